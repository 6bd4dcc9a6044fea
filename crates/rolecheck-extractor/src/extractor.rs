//! Role extraction with a text generator

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::parser::{parse_role_list, RoleReply};
use crate::prompt::role_extraction_prompt;
use rolecheck_domain::TextGenerator;
use std::collections::BTreeSet;
use std::fmt::Display;
use tracing::{debug, info, warn};

/// The RoleExtractor asks a text generator for the roles a document mentions
pub struct RoleExtractor<G> {
    generator: G,
    config: ExtractorConfig,
}

impl<G> RoleExtractor<G>
where
    G: TextGenerator,
    G::Error: Display,
{
    /// Create a new RoleExtractor
    ///
    /// # Errors
    ///
    /// Returns an error if the prompt template is blank.
    pub fn new(generator: G, config: ExtractorConfig) -> Result<Self, ExtractorError> {
        config.validate()?;
        Ok(Self { generator, config })
    }

    /// Extract the set of roles mentioned in `document_text`
    ///
    /// Sends one prompt with the whole document. A "None" reply, an empty
    /// reply, blank input and generator failures all yield an empty set.
    pub fn extract_roles(&self, document_text: &str) -> BTreeSet<String> {
        match self.try_extract_roles(document_text) {
            Ok(roles) => roles,
            Err(e) => {
                warn!("Role extraction failed: {}; treating as no roles found", e);
                BTreeSet::new()
            }
        }
    }

    /// Like [`RoleExtractor::extract_roles`] but surfaces generator failures
    pub fn try_extract_roles(&self, document_text: &str) -> Result<BTreeSet<String>, ExtractorError> {
        if document_text.trim().is_empty() {
            info!("No document content for role extraction");
            return Ok(BTreeSet::new());
        }

        let prompt = role_extraction_prompt(&self.config.prompt_template, document_text);
        debug!("Prompt length: {} chars", prompt.len());

        let response = self
            .generator
            .generate(&prompt)
            .map_err(|e| ExtractorError::Llm(e.to_string()))?;
        debug!("LLM response length: {} chars", response.len());

        let reply = parse_role_list(&response);
        match &reply {
            RoleReply::Roles(roles) => info!("Extracted {} candidate roles", roles.len()),
            RoleReply::NoneFound => info!("Model reported no roles in the document"),
            RoleReply::Empty => warn!("Model returned an empty or unparseable role list"),
        }
        Ok(reply.into_roles())
    }
}
