use bigdecimal::BigDecimal;
use num_traits::ToPrimitive;

pub trait BigDecimalHelpers {
    fn to_f64_lossy(&self) -> Option<f64>;
}

impl BigDecimalHelpers for BigDecimal {
    fn to_f64_lossy(&self) -> Option<f64> {
        self.to_f64()
    }
}

impl BigDecimalHelpers for Option<BigDecimal> {
    fn to_f64_lossy(&self) -> Option<f64> {
        self.as_ref().and_then(|bd| bd.to_f64())
    }
}
