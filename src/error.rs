use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Error, Debug)]
pub enum MotionError {
    #[error("browser API unavailable: {0}")]
    Unavailable(&'static str),

    #[error("javascript error: {0}")]
    Js(String),

    #[error("invalid motion config: {0}")]
    Config(#[from] serde_json::Error),
}

impl From<JsValue> for MotionError {
    fn from(value: JsValue) -> Self {
        let message = value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value));
        MotionError::Js(message)
    }
}
