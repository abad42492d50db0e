//! Spec slicing
//!
//! Cuts the raw markdown down to the method listing and splits it into one
//! block per feature, using the delimiters of a [`SpecConvention`].

use lsp_json_schema_common::{GeneratorError, Result, SpecConvention};

/// Split the LSP markdown into feature blocks
///
/// Keeps the text after the first preamble separator and before the first
/// epilogue separator, splits it on the feature separator and drops the
/// fragment preceding the first feature. Blocks keep their order.
///
/// # Errors
/// [`GeneratorError::Structure`] if either the preamble or the epilogue
/// separator is missing (or the epilogue only occurs before the preamble).
pub fn slice<'a>(text: &'a str, convention: &SpecConvention) -> Result<Vec<&'a str>> {
    let (_, after_preamble) = text
        .split_once(convention.preamble_separator)
        .ok_or_else(|| missing("preamble", convention.preamble_separator, convention))?;

    let (listing, _) = after_preamble
        .split_once(convention.epilogue_separator)
        .ok_or_else(|| missing("epilogue", convention.epilogue_separator, convention))?;

    Ok(listing
        .split(convention.feature_separator)
        .skip(1)
        .collect())
}

fn missing(which: &str, separator: &str, convention: &SpecConvention) -> GeneratorError {
    GeneratorError::Structure(format!(
        "{} separator {:?} not found in the {} specification",
        which, separator, convention.version
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPEC: &str = "\
# Intro
#### <a href=\"#ignored\">Not a feature</a>
#### $ Notifications and Requests
general words
#### <a href=\"#one\">One</a>
first
#### <a href=\"#two\">Two</a>
second
### Implementation considerations
#### <a href=\"#later\">After</a>
";

    #[test]
    fn test_slices_between_separators() {
        let blocks = slice(SPEC, &SpecConvention::v3_14()).unwrap();
        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].contains("first"));
        assert!(blocks[1].contains("second"));
        assert!(blocks
            .iter()
            .all(|b| !b.contains("#### <a href") && !b.contains("general words")));
    }

    #[test]
    fn test_missing_preamble() {
        let result = slice("nothing to see", &SpecConvention::v3_14());
        match result {
            Err(GeneratorError::Structure(msg)) => assert!(msg.contains("preamble")),
            other => panic!("expected structure error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_epilogue() {
        let text = "#### $ Notifications and Requests\n#### <a href=\"#a\">A</a>\n";
        let result = slice(text, &SpecConvention::v3_14());
        match result {
            Err(GeneratorError::Structure(msg)) => assert!(msg.contains("epilogue")),
            other => panic!("expected structure error, got {:?}", other),
        }
    }

    #[test]
    fn test_epilogue_before_preamble_is_an_error() {
        let text = "### Implementation considerations\n#### $ Notifications and Requests\n";
        assert!(slice(text, &SpecConvention::v3_14()).is_err());
    }

    #[test]
    fn test_v3_15_preamble() {
        let text = SPEC.replace("#### $ Notifications and Requests", "#### Server lifetime");
        let blocks = slice(&text, &SpecConvention::v3_15()).unwrap();
        assert_eq!(blocks.len(), 2);
        assert!(slice(&text, &SpecConvention::v3_14()).is_err());
    }
}
