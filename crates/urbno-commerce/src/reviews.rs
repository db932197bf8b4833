//! Customer reviews summary and the write-a-review form.

use crate::account::Accounts;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of reviews shown before "show all".
pub const TOP_REVIEWS: usize = 3;

/// Shortest accepted review text, counted after trimming.
pub const MIN_COMMENT_CHARS: usize = 10;

/// Toast shown after a review is accepted.
pub const REVIEW_THANKS: &str = "Thank you for your review!";

/// A single customer review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub author: String,
    /// Star rating, 1 to 5.
    pub rating: u8,
    #[serde(default)]
    pub title: Option<String>,
    pub comment: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub verified: bool,
}

/// Aggregated reviews for one product.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReviewsData {
    pub average_rating: f64,
    pub total_reviews: u32,
    /// Review counts for 1 to 5 stars, index 0 holding 1-star.
    pub distribution: [u32; 5],
    #[serde(default)]
    pub reviews: Vec<Review>,
}

impl ReviewsData {
    /// Count of reviews with `stars` stars; 0 outside 1..=5.
    pub fn count(&self, stars: u8) -> u32 {
        match stars {
            1..=5 => self.distribution[usize::from(stars - 1)],
            _ => 0,
        }
    }

    /// Share of reviews with `stars` stars, rounded to a whole percent.
    /// Zero when there are no reviews.
    pub fn percentage(&self, stars: u8) -> u32 {
        if self.total_reviews == 0 {
            return 0;
        }
        let count = u64::from(self.count(stars));
        let total = u64::from(self.total_reviews);
        // round(count / total * 100), half up
        ((count * 200 + total) / (total * 2)) as u32
    }

    /// Reviews shown in the summary.
    pub fn top_reviews(&self) -> &[Review] {
        &self.reviews[..self.reviews.len().min(TOP_REVIEWS)]
    }

    /// Average rounded to whole stars for the star row.
    pub fn rounded_stars(&self) -> u8 {
        self.average_rating.round().clamp(0.0, 5.0) as u8
    }

    pub fn has_reviews(&self) -> bool {
        self.total_reviews > 0
    }

    /// "24 reviews" / "1 review".
    pub fn count_label(&self) -> String {
        let noun = if self.total_reviews == 1 { "review" } else { "reviews" };
        format!("{} {noun}", self.total_reviews)
    }
}

/// What the customer typed into the review form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewDraft {
    /// Stars picked, 0 while none is picked.
    pub rating: u8,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub comment: String,
}

/// A review that passed validation, ready to submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReview {
    /// Email of the signed-in author.
    pub author: String,
    pub rating: u8,
    /// Trimmed title; `None` when left blank.
    pub title: Option<String>,
    /// Trimmed comment.
    pub comment: String,
}

/// Why a review draft was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReviewError {
    #[error("Please select a rating")]
    MissingRating,

    #[error("Rating must be between 1 and 5, got {0}")]
    RatingOutOfRange(u8),

    /// Also reported for an empty comment.
    #[error("Review must be at least {min} characters")]
    CommentTooShort { min: usize },

    #[error("Please sign in to write a review")]
    NotSignedIn,
}

impl ReviewDraft {
    pub fn new(rating: u8, title: impl Into<String>, comment: impl Into<String>) -> Self {
        Self {
            rating,
            title: title.into(),
            comment: comment.into(),
        }
    }

    /// Check the draft against the form rules and the session.
    ///
    /// Every problem is reported, not just the first one.
    pub fn validate(&self, accounts: &Accounts) -> Result<NewReview, Vec<ReviewError>> {
        let mut errors = Vec::new();

        let author = accounts.require_user().ok().map(|user| user.email.clone());
        if author.is_none() {
            errors.push(ReviewError::NotSignedIn);
        }

        match self.rating {
            0 => errors.push(ReviewError::MissingRating),
            1..=5 => {}
            other => errors.push(ReviewError::RatingOutOfRange(other)),
        }

        let comment = self.comment.trim();
        if comment.chars().count() < MIN_COMMENT_CHARS {
            errors.push(ReviewError::CommentTooShort {
                min: MIN_COMMENT_CHARS,
            });
        }

        match author {
            Some(author) if errors.is_empty() => {
                let title = self.title.trim();
                Ok(NewReview {
                    author,
                    rating: self.rating,
                    title: (!title.is_empty()).then(|| title.to_string()),
                    comment: comment.to_string(),
                })
            }
            _ => Err(errors),
        }
    }
}
