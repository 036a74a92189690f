//! Name tables used by the dumper. Lookups outside a table yield `"?"`.

use crate::kernel::regtype;

pub(crate) const UNKNOWN: &str = "?";

pub(crate) const LANGUAGE_TYPES: &[&str] = &[
    "generic", "opengl", "dx8_ps", "dx8_vs", "dx9_ps", "dx9_vs", "dx10_ps", "dx10_vs", "dx10_gs",
    "dx11_ps", "dx11_vs", "dx11_gs", "dx11_cs", "dx11_hs", "dx11_ds",
];

pub(crate) const SHADER_TYPES: &[&str] = &["vs", "ps", "gs", "cs", "hs", "ds"];

pub(crate) const DIV_COMPS: &[&str] =
    &["", "_divComp(y)", "_divComp(z)", "_divComp(w)", "_divComp(unknown)"];

/// Write modes; `WRITE` is replaced by the component letter.
pub(crate) const DST_COMPONENTS: &[&str] = &["_", "?", "0", "1"];

pub(crate) const COMPONENT_SELECTS: &[&str] = &["x", "y", "z", "w", "0", "1"];

pub(crate) const SHIFT_SCALES: &[&str] = &["", "_x2", "_x4", "_x8", "_d2", "_d4", "_d8"];

pub(crate) const IMPORT_USAGES: &[&str] = &[
    "position",
    "pointsize",
    "color",
    "backcolor",
    "fog",
    "pixelSampleCoverage",
    "generic",
    "clipdistance",
    "culldistance",
    "primitiveid",
    "vertexid",
    "instanceid",
    "isfrontface",
    "lod",
    "coloring",
    "nodeColoring",
    "normal",
    "rendertargetArrayIndex",
    "viewportArrayIndex",
    "undefined",
    "sampleIndex",
    "edgeTessfactor",
    "insideTessfactor",
    "detailTessfactor",
    "densityTessfactor",
];

pub(crate) const PIXTEX_USAGES: &[&str] = &[
    "unknown",
    "1d",
    "2d",
    "3d",
    "cubemap",
    "2dmsaa",
    "4comp",
    "buffer",
    "1darray",
    "2darray",
    "2darraymsaa",
    "2dPlusW",
    "cubemapPlusW",
    "cubemapArray",
];

pub(crate) const ELEMENT_FORMATS: &[&str] =
    &["unknown", "snorm", "unorm", "sint", "uint", "float", "srgb", "mixed"];

pub(crate) const INTERP_MODES: &[&str] = &[
    "",
    "_interp(constant)",
    "_interp(linear)",
    "_interp(linearCentroid)",
    "_interp(linearNoperspective)",
    "_interp(linearNoperspectiveCentroid)",
    "_interp(linearSample)",
    "_interp(linearNoperspectiveSample)",
];

pub(crate) fn lookup(table: &'static [&'static str], index: impl Into<u32>) -> &'static str {
    usize::try_from(index.into())
        .ok()
        .and_then(|i| table.get(i))
        .copied()
        .unwrap_or(UNKNOWN)
}

pub(crate) fn register_prefix(kind: u8) -> &'static str {
    match kind {
        regtype::LITERAL => "l",
        regtype::TEMP => "r",
        regtype::INPUT => "v",
        regtype::OUTPUT => "o",
        _ => UNKNOWN,
    }
}
