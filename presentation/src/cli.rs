use application::AnswerService;
use clap::Parser;
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Input};
use infrastructure::config::Config;
use shared::types::Result;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "hr_assistant")]
#[command(about = "HR assistant answering from the Azure AI Search knowledge base")]
pub struct Cli {
    /// Question to answer once; omit to start an interactive session
    #[arg(trailing_var_arg = true)]
    pub prompt: Vec<String>,
}

pub struct CliApp {
    service: AnswerService,
}

impl CliApp {
    /// Loads configuration from `.env` / the environment and builds the pipeline.
    pub fn new() -> Result<Self> {
        let config = Config::load()?;
        info!(
            index = %config.search.index_name,
            deployment = %config.openai.deployment,
            "configuration loaded"
        );
        Ok(Self {
            service: AnswerService::from_config(&config)?,
        })
    }

    pub async fn run(&self, cli: Cli) -> Result<()> {
        let prompt = cli.prompt.join(" ");
        if prompt.trim().is_empty() {
            self.handle_chat().await
        } else {
            println!("{}", self.service.answer(prompt.trim()).await);
            Ok(())
        }
    }

    async fn handle_chat(&self) -> Result<()> {
        println!("{}", "Ask an HR question. Type 'exit' to quit.".cyan());
        loop {
            let input: String = Input::with_theme(&ColorfulTheme::default())
                .with_prompt("You")
                .allow_empty(true)
                .interact_text()?;
            let input = input.trim();
            if input.is_empty() {
                continue;
            }
            if is_exit_command(input) {
                break;
            }
            let answer = self.service.answer(input).await;
            println!("{} {}", "JunJun:".green().bold(), answer);
        }
        Ok(())
    }
}

fn is_exit_command(input: &str) -> bool {
    input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit")
}
