//! Usage, help, settings-template and argument-dump rendering.
//!
//! Rendering never fails: current values are refreshed leniently from
//! settings and the environment before they are shown, and secret values
//! are always masked.

pub mod display;
pub mod render;
pub mod usage;

use crate::utils::mask::mask_type;

mask_type!(
    /// Which fields a usage text documents.
    HelpDetail {
        /// Named fields with a short name, and positional fields.
        SHORT_AND_POSITIONAL = 1;
        /// Named fields with only a long name.
        LONG_NAMED = 2;
        /// Environment-exposed fields that are not required.
        ENVIRONMENT = 8;
        QUICK = 1;
        FULL = 1 | 2 | 8;
    }
);

impl HelpDetail {
    /// `-h` asks for quick help, anything else (`--help`) for full help.
    pub fn for_token(token: &str) -> Self {
        if token == "-h" {
            Self::QUICK
        } else {
            Self::FULL
        }
    }
}

mask_type!(
    /// Parts shown by [`crate::Cli::render_args`].
    ArgsView {
        DOCS = 1;
        NAMES = 2;
        DATA_TYPES = 4;
        /// "Running with arguments:" heading.
        HEADER = 8;
        ALL = 15;
    }
);
