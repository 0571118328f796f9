//! Swift Package Manager declaration parser

use crate::domain::Declaration;
use crate::error::RequirementError;
use crate::parser::RequirementParser;

/// Parser for `Package.swift` requirement declarations
pub struct SwiftRequirementParser;

impl RequirementParser for SwiftRequirementParser {
    fn parse(&self, raw: &str) -> Result<Declaration, RequirementError> {
        Declaration::parse(raw.trim())
    }

    fn ecosystem(&self) -> &'static str {
        "swift"
    }
}
