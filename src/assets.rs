pub(crate) mod decode;
pub(crate) mod sprites;
pub(crate) mod svg_raster;
