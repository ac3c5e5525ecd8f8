use crate::markup;
use pagebundle_api::{InlineKind, ReferenceId};

/// URL layout of the inline endpoint:
/// `/<area>[/<version>]/<InlineScripts|InlineStyles>/<id>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineRoutes {
    area: String,
    version: Option<String>,
}

impl InlineRoutes {
    pub fn new(area: impl Into<String>, version: Option<String>) -> Self {
        Self {
            area: area.into(),
            version,
        }
    }

    pub fn controller(kind: InlineKind) -> &'static str {
        match kind {
            InlineKind::Script => "InlineScripts",
            InlineKind::Stylesheet => "InlineStyles",
        }
    }

    fn base(&self, kind: InlineKind) -> String {
        match &self.version {
            Some(version) => format!("/{}/{}/{}", self.area, version, Self::controller(kind)),
            None => format!("/{}/{}", self.area, Self::controller(kind)),
        }
    }

    pub fn link(&self, kind: InlineKind, id: ReferenceId) -> String {
        format!("{}/{}", self.base(kind), id)
    }

    /// Route pattern with an `{id}` capture, as understood by the router.
    pub fn route_pattern(&self, kind: InlineKind) -> String {
        format!("{}/{{id}}", self.base(kind))
    }

    /// Markup referencing interned content, as a file-based asset would.
    pub fn tag(&self, kind: InlineKind, id: ReferenceId) -> String {
        let url = self.link(kind, id);
        match kind {
            InlineKind::Script => markup::script_tag(&url),
            InlineKind::Stylesheet => markup::stylesheet_tag(&url),
        }
    }
}
