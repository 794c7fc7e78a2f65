//! Gateway event handling.
//!
//! Registers the slash commands once connected, then turns every slash command
//! and form submission into a [`SlashCommand`] for the [`Commander`].

use std::sync::Arc;

use log::{debug, error, info};
use serenity::{
    all::{
        ActionRow, ActionRowComponent, Command, CommandDataOption, CommandDataOptionValue,
        CommandInteraction, CommandOptionType, Context, CreateCommand, CreateCommandOption,
        EventHandler, InstallationContext, Interaction, InteractionContext, ModalInteraction,
        Ready,
    },
    async_trait,
};

use crate::{
    commands::{
        COMMAND_DEFINITIONS, CommandDefinition, CommandOption, Commander, Form, INPUT_ID,
        OptionKind, OptionValue, SlashCommand, report_failure,
    },
    crafty::CraftyRequester,
    discord::responder::InteractionResponder,
};

/// Serenity event handler forwarding interactions to the [`Commander`].
pub struct Handler {
    commander: Arc<Commander<CraftyRequester>>,
}

impl Handler {
    pub fn new(commander: Arc<Commander<CraftyRequester>>) -> Self {
        Handler { commander }
    }

    async fn on_command(&self, ctx: &Context, command: &CommandInteraction) {
        debug!(
            "received /{} from {}",
            command.data.name,
            command.user.id.get()
        );

        let responder = InteractionResponder::for_command(&ctx.http, command);
        let options = command_options(&command.data.options);

        let result = match SlashCommand::parse(&command.data.name, &options) {
            Ok(slash_command) => {
                self.commander
                    .handle(command.user.id.get(), slash_command, &responder)
                    .await
            }
            Err(e) => Err(e.into()),
        };

        if let Err(e) = result {
            report_failure(&responder, &e).await;
        }
    }

    async fn on_modal(&self, ctx: &Context, modal: &ModalInteraction) {
        debug!(
            "received form {} from {}",
            modal.data.custom_id,
            modal.user.id.get()
        );

        let responder = InteractionResponder::for_modal(&ctx.http, modal);
        let submitted = Form::parse(&modal.data.custom_id)
            .and_then(|form| form.submit(&form_value(&modal.data.components)));

        let result = match submitted {
            Ok(slash_command) => {
                self.commander
                    .handle(modal.user.id.get(), slash_command, &responder)
                    .await
            }
            Err(e) => Err(e.into()),
        };

        if let Err(e) = result {
            report_failure(&responder, &e).await;
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("Logged in as {}", ready.user.name);
        info!("only user {} can run commands", self.commander.owner_id());

        let commands: Vec<CreateCommand> =
            COMMAND_DEFINITIONS.iter().map(create_command).collect();
        match Command::set_global_commands(&ctx.http, commands).await {
            Ok(registered) => info!("synced {} slash commands", registered.len()),
            Err(e) => error!("failed to sync slash commands: {}", e),
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        match interaction {
            Interaction::Command(command) => self.on_command(&ctx, &command).await,
            Interaction::Modal(modal) => self.on_modal(&ctx, &modal).await,
            _ => {}
        }
    }
}

/// Builds the registration payload of a slash command.
///
/// Commands are usable in guilds and direct messages, installed on a guild or
/// on a user account.
fn create_command(definition: &CommandDefinition) -> CreateCommand {
    definition.options.iter().fold(
        CreateCommand::new(definition.name)
            .description(definition.description)
            .contexts(vec![
                InteractionContext::Guild,
                InteractionContext::BotDm,
                InteractionContext::PrivateChannel,
            ])
            .integration_types(vec![InstallationContext::Guild, InstallationContext::User]),
        |command, option| {
            let created = match option.kind {
                OptionKind::String => CreateCommandOption::new(
                    CommandOptionType::String,
                    option.name,
                    option.description,
                ),
                OptionKind::Integer => CreateCommandOption::new(
                    CommandOptionType::Integer,
                    option.name,
                    option.description,
                )
                .min_int_value(1),
            };
            command.add_option(created.required(option.required))
        },
    )
}

/// Converts the options of an invoked command, ignoring unsupported types.
fn command_options(options: &[CommandDataOption]) -> Vec<CommandOption> {
    options
        .iter()
        .filter_map(|option| {
            let value = match &option.value {
                CommandDataOptionValue::String(text) => OptionValue::String(text.clone()),
                CommandDataOptionValue::Integer(number) => OptionValue::Integer(*number),
                _ => return None,
            };
            Some(CommandOption::new(&option.name, value))
        })
        .collect()
}

/// Text typed in the input of a submitted form, empty when absent.
fn form_value(rows: &[ActionRow]) -> String {
    rows.iter()
        .flat_map(|row| row.components.iter())
        .find_map(|component| match component {
            ActionRowComponent::InputText(input) if input.custom_id == INPUT_ID => {
                input.value.clone()
            }
            _ => None,
        })
        .unwrap_or_default()
}
