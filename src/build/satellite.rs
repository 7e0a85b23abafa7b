use std::path::Path;

use tracing::info;

use crate::args::{AlArgs, Embed, ResGenArgs};
use crate::cleanup::{cleanup, glob_in};
use crate::culture::CultureDescriptor;
use crate::error::Error;
use crate::resource::{BLOB_EXTENSION, discover};

use super::{Toolchain, satellite_library_path};

/// Compiles the sources in `source_dir` for `culture` and links every blob in
/// `out_dir` into `{logical_namespace}.resources.dll`.
///
/// The link step re-scans `out_dir` rather than using only the blobs made
/// here, so whatever compiled resources already sit in the culture folder are
/// linked too. Returns `false` when there was nothing to compile or link.
pub fn build_culture_lib(
    toolchain: Toolchain<'_>,
    source_dir: &Path,
    out_dir: &Path,
    logical_namespace: &str,
    culture: &CultureDescriptor,
) -> Result<bool, Error> {
    let files = discover(source_dir, false)?;
    if files.is_empty() {
        return Ok(false);
    }

    info!(
        culture = %culture,
        namespace = logical_namespace,
        count = files.len(),
        "generating resources for culture"
    );
    for file in &files {
        let blob = out_dir.join(file.satellite_blob_file_name(logical_namespace, &culture.name));
        toolchain.invoke(
            &toolchain.paths.resgen,
            ResGenArgs::new(&file.path, blob).to_args(),
        );
    }

    let blobs = glob_in(out_dir, BLOB_EXTENSION);
    if blobs.is_empty() {
        return Ok(false);
    }

    let args = AlArgs::satellite(
        culture.name.as_str(),
        satellite_library_path(out_dir, logical_namespace),
    )
    .with_embeds(blobs.iter().map(Embed::from_path));
    toolchain.invoke(&toolchain.paths.al, args.to_args());

    info!(culture = %culture, "deleting temp resource files");
    cleanup(blobs);

    Ok(true)
}
