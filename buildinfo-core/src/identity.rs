use serde::Serialize;

use crate::build_version::{
    BUILD_COMPILE_DATE, BUILD_COMPILE_DATE_SENTINEL, SOURCE_REVISION_DATE,
    SOURCE_REVISION_DATE_SENTINEL, SOURCE_REVISION_ID, SOURCE_REVISION_ID_SENTINEL,
};

/// The three provenance strings of a build, taken together.
///
/// [`BuildIdentity::CURRENT`] holds the values compiled into this process.
/// Other instances can be built with struct-update syntax, which replaces
/// only the fields named.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BuildIdentity {
    pub source_revision_id: &'static str,
    pub source_revision_date: &'static str,
    pub build_compile_date: &'static str,
}

impl BuildIdentity {
    /// Provenance of the running build.
    pub const CURRENT: BuildIdentity = BuildIdentity {
        source_revision_id: SOURCE_REVISION_ID,
        source_revision_date: SOURCE_REVISION_DATE,
        build_compile_date: BUILD_COMPILE_DATE,
    };

    /// Provenance of a build where nothing was provisioned.
    pub const UNPROVISIONED: BuildIdentity = BuildIdentity {
        source_revision_id: SOURCE_REVISION_ID_SENTINEL,
        source_revision_date: SOURCE_REVISION_DATE_SENTINEL,
        build_compile_date: BUILD_COMPILE_DATE_SENTINEL,
    };

    pub fn source_revision_id_is_provisioned(&self) -> bool {
        self.source_revision_id != SOURCE_REVISION_ID_SENTINEL
    }

    pub fn source_revision_date_is_provisioned(&self) -> bool {
        self.source_revision_date != SOURCE_REVISION_DATE_SENTINEL
    }

    pub fn build_compile_date_is_provisioned(&self) -> bool {
        self.build_compile_date != BUILD_COMPILE_DATE_SENTINEL
    }

    /// True when every field carries a real value.
    pub fn is_provisioned(&self) -> bool {
        self.source_revision_id_is_provisioned()
            && self.source_revision_date_is_provisioned()
            && self.build_compile_date_is_provisioned()
    }
}

impl Default for BuildIdentity {
    fn default() -> Self {
        Self::CURRENT
    }
}
