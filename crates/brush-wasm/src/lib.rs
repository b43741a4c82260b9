//! Brush stroke compiler as a WASM module for browser environments.
//!
//! This crate exposes the compilation pipeline via `wasm-bindgen`, so a
//! browser front-end can preview and export controller streams.
//!
//! # Usage (JavaScript)
//!
//! ```js
//! import init, { compile, disassemble } from 'brush-wasm';
//!
//! await init();
//!
//! const result = JSON.parse(compile("[[[0,0],[100,0],[200,0]]]", ""));
//! // { success: true, stream: [24, 0, 0, ...], stream_sha256: "...", ... }
//! console.log(JSON.parse(disassemble(new Uint8Array(result.stream))));
//! ```

use brush_compiler::{CompileOptions, CompileResult};
use brush_types::{Diagnostic, Polyline, StrokeError};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Compile an outlines JSON document.
///
/// `options_json` is a `CompileOptions` document; an empty string selects
/// the defaults. Returns a JSON string containing a `CompileResult`:
/// ```json
/// {
///   "success": true,
///   "stream": [24, 0, 0, 0, 0, 9, 196, ...],
///   "stream_sha256": "…",
///   "errors": { "errors": [], "warnings": [], "total_errors": 0, "total_warnings": 0 },
///   "instruction_count": 26,
///   "reload_count": 2,
///   "stats": { … }
/// }
/// ```
///
/// On failure, `success` is `false`, `stream` is `null`, and `errors`
/// contains structured diagnostics.
#[wasm_bindgen]
pub fn compile(outlines_json: &str, options_json: &str) -> String {
    let result = match parse_options(options_json) {
        Ok(options) => brush_compiler::compile_to_result(outlines_json, &options),
        Err(e) => options_failure(&e),
    };
    to_json(&result)
}

/// Compile outlines given as JS arrays (`[[[x, y], ...], ...]`) straight to
/// stream bytes.
///
/// `options` may be `undefined` for the defaults. Errors are thrown as
/// structured diagnostic objects.
#[wasm_bindgen]
pub fn compile_outlines(outlines: JsValue, options: JsValue) -> Result<Vec<u8>, JsValue> {
    let outlines: Vec<Polyline> = serde_wasm_bindgen::from_value(outlines)
        .map_err(|e| throw(&StrokeError::MalformedInput(e.to_string())))?;
    let options: CompileOptions = if options.is_undefined() || options.is_null() {
        CompileOptions::default()
    } else {
        serde_wasm_bindgen::from_value(options)
            .map_err(|e| throw(&StrokeError::MalformedInput(e.to_string())))?
    };
    brush_compiler::compile(&outlines, &options).map_err(|e| throw(&e))
}

/// Decode a stream into a JSON array of instruction listings, one string
/// per frame (`"MOVE subspace x=0 y=0 z=2500"`, …).
///
/// Returns `{"error": "..."}` when the stream cannot be decoded.
#[wasm_bindgen]
pub fn disassemble(stream: &[u8]) -> String {
    match brush_codegen::decode_stream(stream) {
        Ok(instructions) => {
            let lines: Vec<String> = instructions.iter().map(ToString::to_string).collect();
            to_json(&lines)
        }
        Err(e) => to_json(&serde_json::json!({ "error": e.to_string() })),
    }
}

/// Return the compiler version string.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn parse_options(json: &str) -> Result<CompileOptions, StrokeError> {
    if json.trim().is_empty() {
        Ok(CompileOptions::default())
    } else {
        CompileOptions::from_json(json)
    }
}

fn options_failure(err: &StrokeError) -> CompileResult {
    let mut errors = brush_types::CompileErrors::empty();
    errors.push_error(Diagnostic::from(err));
    CompileResult {
        success: false,
        stream: None,
        stream_sha256: None,
        errors,
        instruction_count: 0,
        reload_count: 0,
        stats: Default::default(),
    }
}

fn throw(err: &StrokeError) -> JsValue {
    serde_wasm_bindgen::to_value(&Diagnostic::from(err))
        .unwrap_or_else(|_| JsValue::from_str(&err.to_string()))
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        format!(
            r#"{{"success":false,"stream":null,"errors":{{"errors":[{{"message":"Serialization error: {}"}}],"warnings":[],"total_errors":1,"total_warnings":0}}}}"#,
            e
        )
    })
}
