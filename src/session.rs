//! The single in-memory operator session.
//!
//! One process, one operator, one session. Login mints an opaque bearer
//! token; a scrape installs a campaign and bumps the generation counter so
//! edits against an older campaign are rejected; reset clears everything.

use uuid::Uuid;

use crate::models::CaptionVariant;

/// Campaign held for the duration of one scrape-edit-save cycle.
#[derive(Debug, Clone, Default)]
pub struct Campaign {
    pub product_name: String,
    pub variants: Vec<CaptionVariant>,
}

/// Outcome of applying an operator edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Applied,
    NoCampaign,
    VariantOutOfRange,
    StaleGeneration,
}

#[derive(Debug, Default)]
pub struct Session {
    token: Option<String>,
    campaign: Option<Campaign>,
    generation: u64,
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a fresh bearer token, invalidating any previous one.
    pub fn login(&mut self) -> String {
        let token = Uuid::new_v4().to_string();
        self.token = Some(token.clone());
        token
    }

    #[must_use]
    pub fn is_authorized(&self, token: &str) -> bool {
        self.token.as_deref() == Some(token)
    }

    /// Install a freshly generated campaign and bump the generation counter.
    /// Returns the new generation.
    pub fn set_campaign(&mut self, product_name: String, variants: Vec<CaptionVariant>) -> u64 {
        self.generation += 1;
        self.campaign = Some(Campaign {
            product_name,
            variants,
        });
        self.generation
    }

    #[must_use]
    pub fn campaign(&self) -> Option<&Campaign> {
        self.campaign.as_ref()
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Apply an operator edit to one variant's post text.
    ///
    /// `expected_generation` guards against edits aimed at a campaign that
    /// has since been replaced; `None` skips the check.
    pub fn edit_variant(
        &mut self,
        index: usize,
        post: String,
        expected_generation: Option<u64>,
    ) -> EditOutcome {
        if let Some(expected) = expected_generation
            && expected != self.generation
        {
            return EditOutcome::StaleGeneration;
        }

        let Some(campaign) = self.campaign.as_mut() else {
            return EditOutcome::NoCampaign;
        };

        match campaign.variants.get_mut(index) {
            Some(variant) => {
                variant.post = post;
                EditOutcome::Applied
            }
            None => EditOutcome::VariantOutOfRange,
        }
    }

    #[must_use]
    pub fn variant(&self, index: usize) -> Option<&CaptionVariant> {
        self.campaign.as_ref()?.variants.get(index)
    }

    /// Clear everything, including authentication. The operator must log in
    /// again after a reset.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
