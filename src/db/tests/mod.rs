mod deliveries;
mod recipients;
