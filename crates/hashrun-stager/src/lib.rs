//! Artifact staging for hashrun.
//!
//! Turns a target description (an inline hash, a local file, or a URL) into
//! local files ready to hand to hashcat. Downloads named `*.gz` are
//! gunzipped and `*.tar` / `*.tar.gz` / `*.tgz` archives are unpacked into
//! the work directory.

mod error;
mod stager;
mod target;
mod unpack;

pub use error::StageError;
pub use stager::{ArtifactStager, StagerConfig};
pub use target::TargetSpec;
pub use unpack::unpack;
