// Response Rendering
//
// Turns the outcome of one process run into the exact byte payload a
// client receives. The caller decides when to render; the runner itself
// never formats anything.

use crate::domain::CapturedOutput;
use crate::port::RunError;

/// Sent when the child produced no bytes on either stream
pub const NO_OUTPUT_PLACEHOLDER: &str = "No output or errors.";

/// Render a run outcome into the wire payload.
///
/// Stream bytes are spliced in unmodified; only the surrounding labels are
/// ASCII text. A block is omitted entirely when its stream is empty, and a
/// fully empty run yields [`NO_OUTPUT_PLACEHOLDER`] so the client always
/// receives a non-empty response.
pub fn render_response(outcome: &Result<CapturedOutput, RunError>) -> Vec<u8> {
    match outcome {
        Ok(output) => render_output(output),
        Err(RunError::NotFound { command }) => {
            format!("Executable not found: {command}").into_bytes()
        }
        Err(err) => format!("An error occurred: {err}").into_bytes(),
    }
}

fn render_output(output: &CapturedOutput) -> Vec<u8> {
    let mut response = Vec::with_capacity(output.stdout.len() + output.stderr.len() + 18);

    if !output.stdout.is_empty() {
        response.extend_from_slice(b"Output:\n");
        response.extend_from_slice(&output.stdout);
        response.push(b'\n');
    }
    if !output.stderr.is_empty() {
        response.extend_from_slice(b"Errors:\n");
        response.extend_from_slice(&output.stderr);
        response.push(b'\n');
    }

    if response.is_empty() {
        NO_OUTPUT_PLACEHOLDER.as_bytes().to_vec()
    } else {
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(stdout: &str, stderr: &str) -> Result<CapturedOutput, RunError> {
        Ok(CapturedOutput::new(stdout, stderr))
    }

    #[test]
    fn both_streams_rendered_in_order() {
        let rendered = render_response(&ok("hello\n", "warning\n"));
        assert_eq!(rendered, b"Output:\nhello\n\nErrors:\nwarning\n\n");
    }

    #[test]
    fn stdout_only_omits_errors_block() {
        let rendered = render_response(&ok("hi\n", ""));
        assert_eq!(rendered, b"Output:\nhi\n\n");
    }

    #[test]
    fn stderr_only_omits_output_block() {
        let rendered = render_response(&ok("", "boom\n"));
        assert_eq!(rendered, b"Errors:\nboom\n\n");
    }

    #[test]
    fn empty_run_yields_placeholder() {
        let rendered = render_response(&ok("", ""));
        assert_eq!(rendered, NO_OUTPUT_PLACEHOLDER.as_bytes());
    }

    #[test]
    fn missing_executable_names_the_command() {
        let outcome = Err(RunError::NotFound {
            command: "/opt/tools/report".to_string(),
        });
        assert_eq!(
            render_response(&outcome),
            b"Executable not found: /opt/tools/report"
        );
    }

    #[test]
    fn other_failures_use_generic_prefix() {
        let outcome = Err(RunError::Spawn {
            command: "/opt/tools/report".to_string(),
            reason: "Permission denied".to_string(),
        });
        let rendered = String::from_utf8(render_response(&outcome)).unwrap();
        assert!(rendered.starts_with("An error occurred: "));
        assert!(rendered.contains("Permission denied"));
    }

    #[test]
    fn non_utf8_stream_bytes_pass_through() {
        let output = CapturedOutput::new(vec![0xff, 0xfe, 0x00], vec![]);
        let rendered = render_response(&Ok(output));
        assert_eq!(rendered, b"Output:\n\xff\xfe\x00\n");
    }
}
