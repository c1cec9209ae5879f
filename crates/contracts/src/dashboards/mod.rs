pub mod d402_hourly_sales;
