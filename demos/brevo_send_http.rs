use brevo_mailer::configuration::HostSettings;
use brevo_mailer::domain::{Mailbox, OutboundMessage};
use brevo_mailer::email::Brevo;
use brevo_mailer::host::{HostConfiguration, HostSender, OperatorIdentity, SenderModule};
use brevo_mailer::telemetry::{get_subscriber, init_subscriber};
use config::{Config, File};
use std::sync::Arc;

struct LocalHost {
    recipient: Mailbox,
}

impl HostConfiguration for LocalHost {
    fn default_sender(&self) -> HostSender {
        HostSender::default()
    }
}

impl OperatorIdentity for LocalHost {
    fn current_operator(&self) -> Option<Mailbox> {
        Some(self.recipient.clone())
    }
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let subscriber = get_subscriber("brevo_send_http".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let recipient = std::env::args()
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!("usage: brevo_send_http <recipient-email>"))?;

    let settings: HostSettings = Config::builder()
        .add_source(File::with_name("configuration/brevo"))
        .build()?
        .try_deserialize()?;

    let host = Arc::new(LocalHost {
        recipient: Mailbox::address(recipient.clone()),
    });
    let brevo = Brevo::new(host.clone(), host);

    let outcome = brevo.test_connection(&settings).await?;
    println!("{:#?}", outcome);

    let time = chrono::Local::now().format("%Y-%m-%d %H:%M").to_string();
    let message = OutboundMessage::builder(format!("Hello, world! {}", time))
        .to(Mailbox::address(recipient))
        .html_body("<h1>Hello, world!</h1>")
        .build();

    brevo.send(&settings, &message).await?;

    Ok(())
}
