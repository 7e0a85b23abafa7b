use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::args::{AccessorRequest, CscArgs, ResGenArgs};
use crate::cleanup::{cleanup, glob_in};
use crate::error::Error;
use crate::resource::{BLOB_EXTENSION, GENERATED_SOURCE_EXTENSION, discover};

use super::{Toolchain, default_library_path};

/// Compiles the invariant-culture sources in `source_dir` into the default
/// library, with one generated accessor class per source.
///
/// Returns `false` without touching `out_dir` when there is nothing to build.
/// Tool failures do not change the result: intermediates are always removed
/// and the function still returns `true`.
pub fn build_default(
    toolchain: Toolchain<'_>,
    source_dir: &Path,
    out_dir: &Path,
    root_namespace: &str,
    main_at_root: bool,
) -> Result<bool, Error> {
    let files = discover(source_dir, false)?;
    if files.is_empty() {
        return Ok(false);
    }

    info!(count = files.len(), "generating default resources");
    let mut blobs: Vec<PathBuf> = Vec::with_capacity(files.len());
    for file in &files {
        let name = file.derive(root_namespace);
        let blob = out_dir.join(name.blob_file_name());
        let args = ResGenArgs::new(&file.path, &blob).with_accessor(AccessorRequest {
            output: out_dir.join(name.source_file_name()),
            namespace: name.namespace,
            class_name: name.symbol,
        });
        toolchain.invoke(&toolchain.paths.resgen, args.to_args());
        if !blobs.contains(&blob) {
            blobs.push(blob);
        }
    }

    info!("compiling default resources");
    let compiled: Vec<PathBuf> = blobs.iter().filter(|b| b.is_file()).cloned().collect();
    if compiled.is_empty() {
        warn!(out_dir = %out_dir.display(), "no compiled resources, skipping default library");
    } else {
        let output = default_library_path(out_dir, root_namespace, main_at_root);
        let args = CscArgs::library(output)
            .with_resources(compiled)
            .with_sources(glob_in(out_dir, GENERATED_SOURCE_EXTENSION));
        toolchain.invoke(&toolchain.paths.csc, args.to_args());
    }

    info!("deleting temp files");
    let mut temp_files = blobs;
    for path in glob_in(out_dir, BLOB_EXTENSION)
        .into_iter()
        .chain(glob_in(out_dir, GENERATED_SOURCE_EXTENSION))
    {
        if !temp_files.contains(&path) {
            temp_files.push(path);
        }
    }
    cleanup(temp_files);

    Ok(true)
}
