use log::{error, info};
use reqwest::blocking::Client;
use reqwest::StatusCode;

use crate::models::PassportRecord;
use crate::utils::PassportError;

/// Destination for reviewed records.
pub trait UploadSink {
    fn submit(&self, record: &PassportRecord) -> Result<(), PassportError>;
}

/// POSTs the record as JSON to a spreadsheet web hook. Only a 200 counts as
/// accepted; there is no retry.
pub struct HttpUploadSink {
    endpoint: String,
    client: Client,
}

impl HttpUploadSink {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: Client::new(),
        }
    }

    /// Use a preconfigured client, e.g. with custom timeouts or proxy settings.
    pub fn with_client(endpoint: impl Into<String>, client: Client) -> Self {
        Self {
            endpoint: endpoint.into(),
            client,
        }
    }
}

impl UploadSink for HttpUploadSink {
    fn submit(&self, record: &PassportRecord) -> Result<(), PassportError> {
        info!("Uploading record to {}", self.endpoint);
        let response = self
            .client
            .post(&self.endpoint)
            .json(record)
            .send()
            .map_err(|e| PassportError::UploadError(format!("Request to {} failed: {}", self.endpoint, e)))?;

        let status = response.status();
        if status == StatusCode::OK {
            info!("Upload accepted");
            Ok(())
        } else {
            error!("Upload rejected with status {}", status);
            Err(PassportError::UploadRejected {
                status: status.as_u16(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::sync::mpsc;
    use std::thread;

    // Answers a single request with `status_line` and hands back its request line and body.
    fn one_shot_server(status_line: &'static str, path: &str) -> (String, mpsc::Receiver<(String, String)>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}{}", listener.local_addr().unwrap(), path);
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut request_line = String::new();
            reader.read_line(&mut request_line).unwrap();
            let mut content_length = 0usize;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                let line = line.trim_end();
                if line.is_empty() {
                    break;
                }
                if let Some((name, value)) = line.split_once(':') {
                    if name.eq_ignore_ascii_case("content-length") {
                        content_length = value.trim().parse().unwrap();
                    }
                }
            }
            let mut body = vec![0u8; content_length];
            reader.read_exact(&mut body).unwrap();
            tx.send((request_line.trim_end().to_string(), String::from_utf8(body).unwrap()))
                .unwrap();

            let mut stream = stream;
            write!(stream, "{}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n", status_line).unwrap();
        });

        (url, rx)
    }

    fn sink(url: String) -> HttpUploadSink {
        HttpUploadSink::with_client(url, Client::builder().no_proxy().build().unwrap())
    }

    fn sample_record() -> PassportRecord {
        PassportRecord {
            name: "Anna Maria Eriksson".to_string(),
            passport_number: "L8988901".to_string(),
            code: "UTO".to_string(),
            date_of_birth: "12/08/1974".to_string(),
            date_of_issue: "16/04/2012".to_string(),
            date_of_expiry: "15/04/2022".to_string(),
        }
    }

    #[test]
    fn test_submit_posts_six_keys() {
        let (url, request) = one_shot_server("HTTP/1.1 200 OK", "/exec");
        sink(url).submit(&sample_record()).unwrap();

        let (_, body) = request.recv().unwrap();
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 6);
        assert_eq!(object["name"], "Anna Maria Eriksson");
        assert_eq!(object["passport_number"], "L8988901");
        assert_eq!(object["code"], "UTO");
        assert_eq!(object["date_of_birth"], "12/08/1974");
        assert_eq!(object["date_of_issue"], "16/04/2012");
        assert_eq!(object["date_of_expiry"], "15/04/2022");
    }

    #[test]
    fn test_posts_to_configured_endpoint() {
        let (url, request) = one_shot_server("HTTP/1.1 200 OK", "/macros/s/abc/exec?sheet=passports");
        sink(url).submit(&sample_record()).unwrap();

        let (request_line, _) = request.recv().unwrap();
        assert_eq!(request_line, "POST /macros/s/abc/exec?sheet=passports HTTP/1.1");
    }

    #[test]
    fn test_non_200_is_rejected() {
        let (url, _body) = one_shot_server("HTTP/1.1 500 Internal Server Error", "/exec");
        let result = sink(url).submit(&sample_record());
        assert!(matches!(result, Err(PassportError::UploadRejected { status: 500 })));
    }

    #[test]
    fn test_other_success_codes_are_rejected() {
        let (url, _body) = one_shot_server("HTTP/1.1 201 Created", "/exec");
        let result = sink(url).submit(&sample_record());
        assert!(matches!(result, Err(PassportError::UploadRejected { status: 201 })));
    }

    #[test]
    fn test_unreachable_endpoint_is_an_error() {
        // Bind then drop to get a port nobody listens on.
        let port = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port();
        let result = sink(format!("http://127.0.0.1:{}/exec", port)).submit(&sample_record());
        assert!(matches!(result, Err(PassportError::UploadError(_))));
    }
}
