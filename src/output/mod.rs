pub mod json;
pub mod text;

use serde_json::Value;

use crate::error::TaskboardError;
use crate::notify::Notice;

/// Print a successful result: the JSON envelope, or the notices followed by
/// whatever `render_text` prints.
pub fn emit_success(json_output: bool, data: Value, notices: &[Notice], render_text: impl FnOnce()) {
    if json_output {
        print_json(&json::success(data, notices));
    } else {
        text::print_notices(notices);
        render_text();
    }
}

pub fn emit_error(json_output: bool, err: &TaskboardError, notices: &[Notice]) {
    if json_output {
        print_json(&json::error(err, notices));
    } else {
        text::print_notices(notices);
        eprintln!("Error: {}", err.message);
    }
}

fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("Error: cannot render JSON output: {e}"),
    }
}
