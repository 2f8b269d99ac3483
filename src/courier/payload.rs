//! `POST send` request body

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// File name the email channel override always uses
pub const CHANNEL_ATTACHMENT_FILENAME: &str = "report.csv";

/// Text attachment supplied by the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub file_name: String,
    /// Raw text; encoded as base64 of its UTF-8 bytes
    pub content: String,
    /// Encoding label forwarded to the SMTP provider (e.g. `base64`)
    pub encoding: String,
    pub content_type: String,
}

impl Attachment {
    pub fn new(
        file_name: impl Into<String>,
        content: impl Into<String>,
        encoding: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content: content.into(),
            encoding: encoding.into(),
            content_type: content_type.into(),
        }
    }

    pub fn encoded_content(&self) -> String {
        STANDARD.encode(self.content.as_bytes())
    }
}

/// A single-recipient email send
#[derive(Debug, Clone, PartialEq)]
pub struct SendRequest {
    pub email: String,
    pub template_id: String,
    pub data: Map<String, Value>,
    pub attachment: Option<Attachment>,
}

impl SendRequest {
    pub fn new(
        email: impl Into<String>,
        template_id: impl Into<String>,
        data: Map<String, Value>,
    ) -> Self {
        Self {
            email: email.into(),
            template_id: template_id.into(),
            data,
            attachment: None,
        }
    }

    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachment = Some(attachment);
        self
    }

    /// Build the wire envelope.
    ///
    /// An attachment is encoded once and placed under both the SMTP provider
    /// override (caller's file name) and the email channel override (always
    /// [`CHANNEL_ATTACHMENT_FILENAME`]).
    pub fn payload(&self) -> SendPayload<'_> {
        let (providers, channels) = match &self.attachment {
            Some(attachment) => {
                let content = attachment.encoded_content();
                (
                    Some(Providers {
                        smtp: SmtpProvider {
                            provider_override: SmtpOverride {
                                body: SmtpBody {
                                    attachments: vec![SmtpAttachment {
                                        filename: &attachment.file_name,
                                        content: content.clone(),
                                        encoding: &attachment.encoding,
                                    }],
                                },
                            },
                        },
                    }),
                    Some(Channels {
                        email: EmailChannel {
                            channel_override: EmailOverride {
                                attachments: vec![EmailAttachment {
                                    filename: CHANNEL_ATTACHMENT_FILENAME,
                                    content_type: &attachment.content_type,
                                    data: content,
                                }],
                            },
                        },
                    }),
                )
            }
            None => (None, None),
        };

        SendPayload {
            message: Message {
                routing: Routing {
                    method: "single",
                    channels: ["email"],
                },
                template: &self.template_id,
                to: Recipient { email: &self.email },
                data: &self.data,
                providers,
                channels,
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SendPayload<'a> {
    message: Message<'a>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    routing: Routing,
    template: &'a str,
    to: Recipient<'a>,
    data: &'a Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    providers: Option<Providers<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    channels: Option<Channels<'a>>,
}

#[derive(Debug, Serialize)]
struct Routing {
    method: &'static str,
    channels: [&'static str; 1],
}

#[derive(Debug, Serialize)]
struct Recipient<'a> {
    email: &'a str,
}

#[derive(Debug, Serialize)]
struct Providers<'a> {
    smtp: SmtpProvider<'a>,
}

#[derive(Debug, Serialize)]
struct SmtpProvider<'a> {
    #[serde(rename = "override")]
    provider_override: SmtpOverride<'a>,
}

#[derive(Debug, Serialize)]
struct SmtpOverride<'a> {
    body: SmtpBody<'a>,
}

#[derive(Debug, Serialize)]
struct SmtpBody<'a> {
    attachments: Vec<SmtpAttachment<'a>>,
}

#[derive(Debug, Serialize)]
struct SmtpAttachment<'a> {
    filename: &'a str,
    content: String,
    encoding: &'a str,
}

#[derive(Debug, Serialize)]
struct Channels<'a> {
    email: EmailChannel<'a>,
}

#[derive(Debug, Serialize)]
struct EmailChannel<'a> {
    #[serde(rename = "override")]
    channel_override: EmailOverride<'a>,
}

#[derive(Debug, Serialize)]
struct EmailOverride<'a> {
    attachments: Vec<EmailAttachment<'a>>,
}

#[derive(Debug, Serialize)]
struct EmailAttachment<'a> {
    filename: &'static str,
    #[serde(rename = "contentType")]
    content_type: &'a str,
    data: String,
}
