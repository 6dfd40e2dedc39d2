pub struct NumericHelper;

impl NumericHelper {
    /// Rounds to `places` decimal digits, half away from zero.
    /// Display formatting only, never applied to stored data.
    pub fn round(value: f64, places: u32) -> f64 {
        let factor = 10f64.powi(places as i32);
        (value * factor).round() / factor
    }

    /// Reduces `a` by repeated subtraction of `b` while `a > b`.
    ///
    /// Not a true modulo: `float_mod(10.0, 5.0)` is 5.0, not 0.0, and a
    /// value already at or below `b` comes back unchanged. `b <= 0`
    /// returns `a` unchanged so that every input terminates.
    pub fn float_mod(mut a: f64, b: f64) -> f64 {
        if b <= 0.0 {
            return a;
        }
        while a > b {
            a -= b;
        }
        a
    }
}
