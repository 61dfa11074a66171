pub mod console_reporter;
pub mod raster_surface;
