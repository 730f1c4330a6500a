// Define the RawKline struct with the six csv fields
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawKline {
    pub timestamp: i64,

    pub low: f64,
    pub high: f64,
    pub open: f64,
    pub close: f64,

    pub volume: f64,
}

// Implement methods for the RawKline struct
impl RawKline {
    // A constructor taking the fields in csv storage order
    pub fn new(timestamp: i64, low: f64, high: f64, open: f64, close: f64, volume: f64) -> Self {
        RawKline {
            timestamp,
            low,
            high,
            open,
            close,
            volume,
        }
    }

    // Whether every price/volume field holds a usable number
    pub fn is_finite(&self) -> bool {
        self.low.is_finite()
            && self.high.is_finite()
            && self.open.is_finite()
            && self.close.is_finite()
            && self.volume.is_finite()
    }
}
