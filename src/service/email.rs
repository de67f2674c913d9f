//! Email Service
//!
//! Renders templates and dispatches the two transactional mails the system
//! sends: the registration/resend OTP and the tutor-request alert.

use lettre::{
    message::{header, MultiPart, SinglePart},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tera::{Context, Tera};

use crate::utils::error::{AppError, AppResult};

/// Email service configuration
#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: String,
    pub smtp_password: String,
    pub from_email: String,
    pub from_name: String,
}

impl EmailConfig {
    /// Create email configuration from environment variables
    pub fn from_env() -> AppResult<Self> {
        Ok(Self {
            smtp_host: std::env::var("SMTP_HOST").unwrap_or_else(|_| "localhost".to_string()),
            smtp_port: std::env::var("SMTP_PORT")
                .unwrap_or_else(|_| "587".to_string())
                .parse()
                .unwrap_or(587),
            smtp_username: std::env::var("SMTP_USERNAME").map_err(|_| {
                AppError::Configuration("SMTP_USERNAME environment variable is required".into())
            })?,
            smtp_password: std::env::var("SMTP_PASSWORD").map_err(|_| {
                AppError::Configuration("SMTP_PASSWORD environment variable is required".into())
            })?,
            from_email: std::env::var("FROM_EMAIL").map_err(|_| {
                AppError::Configuration("FROM_EMAIL environment variable is required".into())
            })?,
            from_name: std::env::var("FROM_NAME").unwrap_or_else(|_| "Tutor Match".to_string()),
        })
    }
}

/// Async SMTP mailer with embedded templates
pub struct EmailService {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    templates: Tera,
    config: EmailConfig,
}

impl EmailService {
    pub fn new(config: EmailConfig) -> AppResult<Self> {
        let creds = Credentials::new(config.smtp_username.clone(), config.smtp_password.clone());

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
            .map_err(|e| AppError::Configuration(format!("Failed to configure SMTP relay: {}", e)))?
            .port(config.smtp_port)
            .credentials(creds)
            .build();

        let mut templates = Tera::default();
        Self::add_embedded_templates(&mut templates)?;

        Ok(Self {
            transport,
            templates,
            config,
        })
    }

    fn add_embedded_templates(tera: &mut Tera) -> AppResult<()> {
        let otp_html = r#"
<!DOCTYPE html>
<html>
<body style="font-family: Arial, sans-serif; color: #333;">
    <h2>Verify your email address</h2>
    <p>Hello {{ email }},</p>
    <p>Your verification code is:</p>
    <p style="font-size: 28px; font-weight: bold; letter-spacing: 4px;">{{ pin }}</p>
    <p>Enter this code to complete your {{ purpose }}.</p>
    <p>Best regards,<br>The {{ app_name }} Team</p>
</body>
</html>
        "#;

        let otp_text = r#"
Verify your email address

Hello {{ email }},

Your verification code is: {{ pin }}

Enter this code to complete your {{ purpose }}.

Best regards,
The {{ app_name }} Team
        "#;

        let request_html = r#"
<!DOCTYPE html>
<html>
<body style="font-family: Arial, sans-serif; color: #333;">
    <h2>New student request</h2>
    <p>{{ student_name }} ({{ student_mail }}) would like you as their tutor.</p>
    <p>Their interests:</p>
    <pre>{{ interests }}</pre>
    <p>Log in to view and respond to the request.</p>
    <p>Best regards,<br>The {{ app_name }} Team</p>
</body>
</html>
        "#;

        let request_text = r#"
New student request

{{ student_name }} ({{ student_mail }}) would like you as their tutor.

Their interests:
{{ interests }}

Log in to view and respond to the request.

Best regards,
The {{ app_name }} Team
        "#;

        tera.add_raw_template("otp_email.html", otp_html)
            .map_err(|e| AppError::Configuration(format!("Failed to add template: {}", e)))?;
        tera.add_raw_template("otp_email.txt", otp_text)
            .map_err(|e| AppError::Configuration(format!("Failed to add template: {}", e)))?;
        tera.add_raw_template("tutor_request.html", request_html)
            .map_err(|e| AppError::Configuration(format!("Failed to add template: {}", e)))?;
        tera.add_raw_template("tutor_request.txt", request_text)
            .map_err(|e| AppError::Configuration(format!("Failed to add template: {}", e)))?;

        Ok(())
    }

    /// Send the registration (or resend) OTP mail
    pub async fn send_registration_otp(
        &self,
        to_email: &str,
        pin: &str,
        resend: bool,
    ) -> AppResult<()> {
        log::info!("sending OTP email to: {}", to_email);

        let mut context = Context::new();
        context.insert("email", to_email);
        context.insert("pin", pin);
        context.insert(
            "purpose",
            if resend { "verification" } else { "registration" },
        );
        context.insert("app_name", &self.config.from_name);

        let subject = if resend {
            "Your new verification code"
        } else {
            "Verify your email address"
        };

        let html_body = self
            .templates
            .render("otp_email.html", &context)
            .map_err(|e| AppError::Internal(format!("Failed to render template: {}", e)))?;
        let text_body = self
            .templates
            .render("otp_email.txt", &context)
            .map_err(|e| AppError::Internal(format!("Failed to render template: {}", e)))?;

        self.dispatch(to_email, subject, text_body, html_body).await
    }

    /// Send the tutor-request alert mail
    pub async fn send_tutor_request(
        &self,
        tutor_email: &str,
        student_name: &str,
        student_mail: &str,
        interests: &str,
    ) -> AppResult<()> {
        log::info!("sending tutor-request email to: {}", tutor_email);

        let mut context = Context::new();
        context.insert("student_name", student_name);
        context.insert("student_mail", student_mail);
        context.insert("interests", interests);
        context.insert("app_name", &self.config.from_name);

        let html_body = self
            .templates
            .render("tutor_request.html", &context)
            .map_err(|e| AppError::Internal(format!("Failed to render template: {}", e)))?;
        let text_body = self
            .templates
            .render("tutor_request.txt", &context)
            .map_err(|e| AppError::Internal(format!("Failed to render template: {}", e)))?;

        self.dispatch(tutor_email, "New student request", text_body, html_body)
            .await
    }

    async fn dispatch(
        &self,
        to_email: &str,
        subject: &str,
        text_body: String,
        html_body: String,
    ) -> AppResult<()> {
        let message = Message::builder()
            .from(
                format!("{} <{}>", self.config.from_name, self.config.from_email)
                    .parse()
                    .map_err(|e| AppError::Configuration(format!("Invalid from address: {}", e)))?,
            )
            .to(to_email
                .parse()
                .map_err(|e| AppError::Validation(format!("Invalid recipient email: {}", e)))?)
            .subject(subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_PLAIN)
                            .body(text_body),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_HTML)
                            .body(html_body),
                    ),
            )
            .map_err(|e| AppError::Internal(format!("Failed to build email message: {}", e)))?;

        match self.transport.send(message).await {
            Ok(_) => {
                log::info!("email sent to: {}", to_email);
                Ok(())
            }
            Err(e) => {
                log::error!("failed to send email to {}: {}", to_email, e);
                Err(AppError::Internal(format!("Failed to send email: {}", e)))
            }
        }
    }
}
