/// Attribute carrying a node's parallax speed factor.
pub const SPEED_ATTRIBUTE: &str = "data-parallax-speed";

/// Missing, unparsable or non-finite speeds mean "no parallax".
pub fn parse_speed(raw: Option<&str>) -> f64 {
    raw.and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|speed| speed.is_finite())
        .unwrap_or(0.0)
}

pub fn offset(position: f64, speed: f64) -> f64 {
    position * speed
}

pub fn transform(offset: f64) -> String {
    format!("translate3d(0, {}px, 0)", offset)
}
