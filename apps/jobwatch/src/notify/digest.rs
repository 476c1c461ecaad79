use std::cmp::Reverse;

use crate::models::posting::SeenPosting;

const SEPARATOR_WIDTH: usize = 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Digest {
    pub subject: String,
    pub body: String,
}

/// Plain-text digest, newest posting first and most relevant first within a day.
pub fn compose_digest(postings: &[SeenPosting]) -> Digest {
    let mut ordered: Vec<&SeenPosting> = postings.iter().collect();
    ordered.sort_by_key(|seen| {
        (
            Reverse(seen.posting.date_posted),
            Reverse(seen.posting.relevance_score),
        )
    });

    let mut body = String::from(
        "Hello,\n\nHere are the new job listings that match your criteria, ordered by date posted:\n\n",
    );
    for seen in ordered {
        let p = &seen.posting;
        body.push_str(&format!("Title: {}\n", p.title));
        body.push_str(&format!("Company: {}\n", p.company));
        body.push_str(&format!("Location: {}\n", p.location));
        body.push_str(&format!("URL: {}\n", p.url));
        body.push_str(&format!(
            "Date Posted: {} (Found: {})\n",
            p.date_posted,
            seen.first_seen_at.format("%Y-%m-%d %H:%M:%S")
        ));
        body.push_str(&format!("Relevance Score: {}\n", p.relevance_score));
        body.push_str(&"-".repeat(SEPARATOR_WIDTH));
        body.push_str("\n\n");
    }
    body.push_str("Happy job hunting!\nYour automated job search");

    Digest {
        subject: format!("New Job Listings Found! ({} jobs)", postings.len()),
        body,
    }
}
