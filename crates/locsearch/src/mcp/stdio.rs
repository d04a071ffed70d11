use crate::prelude::{eprintln, *};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

pub async fn run_stdio(global: crate::Global) -> Result<()> {
    if global.verbose {
        eprintln!("Starting MCP server with stdio transport...");
        eprintln!("Search endpoint: {}", global.base_url);
        eprintln!();
    }

    let reader = BufReader::new(tokio::io::stdin());
    let writer = tokio::io::stdout();

    serve_lines(reader, writer, &global).await
}

/// Answer one JSON-RPC request per input line until EOF.
///
/// Requests are handled one at a time, so a search in progress holds up the
/// next request.
pub async fn serve_lines<R, W>(mut reader: R, mut writer: W, global: &crate::Global) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut line = String::new();

    loop {
        line.clear();
        if reader.read_line(&mut line).await? == 0 {
            break;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if global.verbose {
            eprintln!("Received: {trimmed}");
        }

        let response = super::handle_request(trimmed, global).await;
        let mut response_json = serde_json::to_string(&response)?;
        response_json.push('\n');

        if global.verbose {
            eprint!("Sending: {response_json}");
        }

        writer.write_all(response_json.as_bytes()).await?;
        writer.flush().await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcp::tests::test_global;

    #[tokio::test]
    async fn test_serve_lines_answers_each_request() {
        let input = concat!(
            r#"{"jsonrpc": "2.0", "id": 1, "method": "initialize"}"#,
            "\n\n",
            r#"{"jsonrpc": "2.0", "id": 2, "method": "tools/list"}"#,
            "\n",
        );
        let mut output = Vec::new();

        serve_lines(input.as_bytes(), &mut output, &test_global())
            .await
            .unwrap();

        let lines: Vec<serde_json::Value> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["id"], 1);
        assert_eq!(lines[1]["id"], 2);
        assert!(lines[1]["result"]["tools"].is_array());
    }
}
