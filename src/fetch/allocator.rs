// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Character budget allocation across a batch of fetched pages
//!
//! The budget is split evenly across successful URLs. Pages shorter than
//! their share leave slack behind; that slack is divided evenly among the
//! pages that were cut short, in a single pass. Remainders from integer
//! division, and bonus a beneficiary cannot use, stay unspent.

use tracing::debug;

use super::window::{char_len, prefix};

/// Allocation state for one URL
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationRecord {
    pub url: String,
    pub full_content: String,
    /// Characters this URL was finally allowed
    pub allocated_chars: usize,
    /// Characters this URL actually returns
    pub used_chars: usize,
    /// Full content exceeded the initial allocation
    pub truncated: bool,
}

impl AllocationRecord {
    /// Trimmed content for this URL
    pub fn content(&self) -> &str {
        prefix(&self.full_content, self.used_chars)
    }
}

/// Divide `total_budget` characters across `contents`
///
/// `contents` pairs each URL with its full, untrimmed text. Records come
/// back in input order.
pub fn allocate(contents: Vec<(String, String)>, total_budget: usize) -> Vec<AllocationRecord> {
    let n = contents.len();
    if n == 0 {
        return Vec::new();
    }

    let initial = total_budget / n;
    debug!(
        num_successful = n,
        total_max_length = total_budget,
        initial_allocation_per_url = initial,
        "calculated initial allocation"
    );

    let mut records: Vec<AllocationRecord> = contents
        .into_iter()
        .map(|(url, full_content)| {
            let full_len = char_len(&full_content);
            let used_chars = char_len(prefix(&full_content, initial));
            let truncated = full_len > initial;
            if truncated {
                debug!(url = %url, full_length = full_len, allocated = initial, "URL cut short by initial allocation");
            }
            AllocationRecord {
                url,
                full_content,
                allocated_chars: initial,
                used_chars,
                truncated,
            }
        })
        .collect();

    let total_used: usize = records.iter().map(|r| r.used_chars).sum();
    let remaining = total_budget.saturating_sub(total_used);
    let beneficiaries = records.iter().filter(|r| r.truncated).count();

    debug!(
        total_used,
        remaining_chars = remaining,
        num_beneficiaries = beneficiaries,
        "reallocation status"
    );

    if remaining > 0 && beneficiaries > 0 {
        let bonus = remaining / beneficiaries;
        let mut distributed = 0;
        for record in records.iter_mut().filter(|r| r.truncated) {
            let target = initial + bonus;
            let used = char_len(prefix(&record.full_content, target));
            distributed += used - record.used_chars;
            record.allocated_chars = target;
            record.used_chars = used;
        }
        debug!(
            per_url_reallocation = bonus,
            extra_chars_distributed = distributed,
            final_total_used = total_used + distributed,
            "reallocation complete"
        );
    }

    records
}
