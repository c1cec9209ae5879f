// Dashboard handlers
pub mod d402_hourly_sales;

// Shared indicator catalogue
pub mod indicators;
