//! `autohdr resolve` command

use anyhow::Result;

use crate::cli::ResolveArgs;
use autohdr::ops::{resolve_header, ResolveOptions};
use autohdr::util::ResolveManifest;

/// Combine the manifest (if any) with the command-line flags.
pub fn build_manifest(args: &ResolveArgs) -> Result<ResolveManifest> {
    let mut manifest = match args.manifest {
        Some(ref path) => ResolveManifest::load(path)?,
        None => ResolveManifest::default(),
    };

    manifest.merge(ResolveManifest {
        cache_results: args.cache_results.clone(),
        define_results: args.define_results.clone(),
        subst_results: args.subst_results.clone(),
        template: args.template.clone(),
        output: args.output.clone(),
        mode: args.mode,
        inlines: args.inlines(),
        substitutions: args.substitutions(),
    });

    Ok(manifest)
}

pub fn execute(args: ResolveArgs) -> Result<()> {
    let opts = ResolveOptions::from_manifest(build_manifest(&args)?)?;
    resolve_header(&opts)?;

    tracing::debug!("generated {}", opts.output.display());
    Ok(())
}
