use serde::{Deserialize, Serialize};
use std::fmt;

/// Fine-grained category of a contributed asset.
///
/// The discriminant order follows the document structure: lower values render
/// first within a zone and win when two contributions collapse into one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum AssetKind {
    Style = 0,
    InlineStyle = 1,
    HeadScript = 2,
    HeadInlineScript = 3,
    BodyInlineScript = 4,
    BodyScript = 5,
}

impl AssetKind {
    pub const ALL: [AssetKind; 6] = [
        AssetKind::Style,
        AssetKind::InlineStyle,
        AssetKind::HeadScript,
        AssetKind::HeadInlineScript,
        AssetKind::BodyInlineScript,
        AssetKind::BodyScript,
    ];

    pub fn zone(self) -> Zone {
        match self {
            AssetKind::Style | AssetKind::InlineStyle => Zone::Styles,
            AssetKind::HeadScript | AssetKind::HeadInlineScript => Zone::HeadScripts,
            AssetKind::BodyInlineScript | AssetKind::BodyScript => Zone::BodyScripts,
        }
    }

    pub fn ordinal(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AssetKind::Style => "style",
            AssetKind::InlineStyle => "inline-style",
            AssetKind::HeadScript => "head-script",
            AssetKind::HeadInlineScript => "head-inline-script",
            AssetKind::BodyInlineScript => "body-inline-script",
            AssetKind::BodyScript => "body-script",
        };
        f.write_str(name)
    }
}

/// One of the three places in a page where assets are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    Styles,
    HeadScripts,
    BodyScripts,
}

impl Zone {
    pub fn contains(self, kind: AssetKind) -> bool {
        kind.zone() == self
    }

    /// Kind used for file-based contributions to this zone.
    pub fn file_kind(self) -> AssetKind {
        match self {
            Zone::Styles => AssetKind::Style,
            Zone::HeadScripts => AssetKind::HeadScript,
            Zone::BodyScripts => AssetKind::BodyScript,
        }
    }

    /// Kind used for inline contributions to this zone.
    pub fn inline_kind(self) -> AssetKind {
        match self {
            Zone::Styles => AssetKind::InlineStyle,
            Zone::HeadScripts => AssetKind::HeadInlineScript,
            Zone::BodyScripts => AssetKind::BodyInlineScript,
        }
    }

    pub fn is_script(self) -> bool {
        !matches!(self, Zone::Styles)
    }
}

/// Ordering hint of a contribution. Ascending; lower renders first.
pub type Position = i32;

pub const DEFAULT_POSITION: Position = 0;

/// Sentinel that forces a contribution to render after everything else.
pub const LAST_POSITION: Position = Position::MAX;
