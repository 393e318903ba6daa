mod common;
mod datasets;
mod routing;
