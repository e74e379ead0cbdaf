//! Integer range-list parsing.
//!
//! Configuration values such as "which cell types" or "which epochs" are
//! written as comma-separated lists of integers and inclusive ranges, e.g.
//! `"1,3-5,9"`. Parsing expands the list into the sorted union of its
//! members.

use std::collections::BTreeSet;

use crate::error::{DemesError, ParseError, Result};

/// Parse a range list into the sorted, deduplicated set of its integers.
///
/// Grammar: `token(,token)*` where `token` is `<int>` or `<int>-<int>`
/// (inclusive, ascending). Malformed tokens, descending ranges, and stray
/// separators are format errors naming the offending input.
pub fn parse_range_list(s: &str) -> Result<Vec<i64>> {
    let bad = || DemesError::Parse(ParseError::RangeList(s.to_string()));

    let mut values = BTreeSet::new();
    for token in s.split(',') {
        let token = token.trim();
        if token.is_empty() {
            return Err(bad());
        }

        // A '-' past the first character separates a range; a leading '-'
        // belongs to a negative integer.
        match token[1..].find('-') {
            Some(split) => {
                let (lo, hi) = token.split_at(split + 1);
                let hi = &hi[1..];
                let lo: i64 = lo.trim().parse().map_err(|_| bad())?;
                let hi: i64 = hi.trim().parse().map_err(|_| bad())?;
                if lo > hi {
                    return Err(bad());
                }
                values.extend(lo..=hi);
            }
            None => {
                values.insert(token.parse().map_err(|_| bad())?);
            }
        }
    }

    Ok(values.into_iter().collect())
}
