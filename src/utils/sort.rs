//! Ordering helpers and draft filtering for rendered lists.

use crate::config::BuildMode;
use crate::content::records::{Entry, Job, Post};
use chrono::{Datelike, Utc};
use std::cmp::Reverse;

/// Whether a draft entry should be visible.
///
/// Development builds always show drafts; production builds include an
/// entry only when it is not a draft.
pub const fn include_draft(mode: BuildMode, is_draft: bool) -> bool {
    mode.is_development() || !is_draft
}

/// Sort jobs in place, newest first.
///
/// Primary key is the effective end year (`"Now"` counts as the current
/// calendar year), descending; ties fall back to the start year,
/// descending. The input order is consumed.
pub fn sort_jobs_by_date(jobs: &mut [Entry<Job>]) {
    let current_year = Utc::now().year();
    sort_jobs_by_date_at(jobs, current_year);
}

/// Same as [`sort_jobs_by_date`] with an explicit current year, so the
/// `"Now"` mapping stays deterministic under test.
pub fn sort_jobs_by_date_at(jobs: &mut [Entry<Job>], current_year: i32) {
    jobs.sort_by(|a, b| {
        let a_end = a.data.to.effective_year(current_year);
        let b_end = b.data.to.effective_year(current_year);
        b_end
            .cmp(&a_end)
            .then_with(|| b.data.from.cmp(&a.data.from))
    });
}

/// Return a new list of posts sorted newest first.
///
/// The input is left untouched. Ordering is stable for equal dates, and a
/// raw date string that fails to re-parse sorts last.
pub fn sort_posts_by_date(posts: &[Entry<Post>]) -> Vec<Entry<Post>> {
    let mut sorted = posts.to_vec();
    sorted.sort_by_key(|post| Reverse(post.data.date.timestamp()));
    sorted
}
