//! Interaction replies sent through the Discord HTTP API.

use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::bail;
use serenity::all::{
    Colour, CommandInteraction, CreateActionRow, CreateEmbed, CreateInputText,
    CreateInteractionResponse, CreateInteractionResponseFollowup,
    CreateInteractionResponseMessage, CreateModal, Http, InputTextStyle, ModalInteraction,
};

use crate::commands::{EmbedReply, Form, INPUT_ID, Reply, Responder};

/// Interaction being answered.
#[derive(Clone, Copy)]
enum Target<'a> {
    /// An invoked slash command
    Command(&'a CommandInteraction),
    /// A submitted form
    Modal(&'a ModalInteraction),
}

/// [`Responder`] answering a single Discord interaction.
///
/// Every message is ephemeral. The interaction is marked as answered once the
/// first response went through, later messages are sent as follow-ups.
pub struct InteractionResponder<'a> {
    http: &'a Http,
    target: Target<'a>,
    responded: AtomicBool,
}

impl<'a> InteractionResponder<'a> {
    /// Creates a responder for an invoked slash command.
    pub fn for_command(http: &'a Http, command: &'a CommandInteraction) -> Self {
        Self::new(http, Target::Command(command))
    }

    /// Creates a responder for a submitted form.
    pub fn for_modal(http: &'a Http, modal: &'a ModalInteraction) -> Self {
        Self::new(http, Target::Modal(modal))
    }

    fn new(http: &'a Http, target: Target<'a>) -> Self {
        InteractionResponder {
            http,
            target,
            responded: AtomicBool::new(false),
        }
    }

    async fn respond(&self, response: CreateInteractionResponse) -> Result<(), anyhow::Error> {
        match self.target {
            Target::Command(command) => command.create_response(self.http, response).await?,
            Target::Modal(modal) => modal.create_response(self.http, response).await?,
        }
        self.responded.store(true, Ordering::SeqCst);
        Ok(())
    }
}

impl Responder for InteractionResponder<'_> {
    async fn reply(&self, reply: Reply) -> Result<(), anyhow::Error> {
        self.respond(CreateInteractionResponse::Message(response_message(reply)))
            .await
    }

    async fn defer(&self) -> Result<(), anyhow::Error> {
        self.respond(CreateInteractionResponse::Defer(
            CreateInteractionResponseMessage::new().ephemeral(true),
        ))
        .await
    }

    async fn show_form(&self, form: &Form) -> Result<(), anyhow::Error> {
        if let Target::Modal(_) = self.target {
            bail!("a form submission cannot be answered with another form");
        }
        self.respond(CreateInteractionResponse::Modal(create_modal(form)))
            .await
    }

    async fn follow_up(&self, reply: Reply) -> Result<(), anyhow::Error> {
        let followup = followup_message(reply);
        match self.target {
            Target::Command(command) => command.create_followup(self.http, followup).await?,
            Target::Modal(modal) => modal.create_followup(self.http, followup).await?,
        };
        Ok(())
    }

    fn has_responded(&self) -> bool {
        self.responded.load(Ordering::SeqCst)
    }
}

fn response_message(reply: Reply) -> CreateInteractionResponseMessage {
    let message = CreateInteractionResponseMessage::new().ephemeral(true);
    match reply {
        Reply::Text(text) => message.content(text),
        Reply::Embed(embed) => message.embed(create_embed(embed)),
    }
}

fn followup_message(reply: Reply) -> CreateInteractionResponseFollowup {
    let followup = CreateInteractionResponseFollowup::new().ephemeral(true);
    match reply {
        Reply::Text(text) => followup.content(text),
        Reply::Embed(embed) => followup.embed(create_embed(embed)),
    }
}

fn create_embed(embed: EmbedReply) -> CreateEmbed {
    CreateEmbed::new()
        .title(embed.title)
        .colour(Colour::new(embed.colour.rgb()))
        .fields(
            embed
                .fields
                .into_iter()
                .map(|field| (field.name, field.value, field.inline)),
        )
}

fn create_modal(form: &Form) -> CreateModal {
    let field = form.field();
    let mut input = CreateInputText::new(InputTextStyle::Short, field.label, INPUT_ID)
        .placeholder(field.placeholder)
        .required(true);
    if let Some(max_length) = field.max_length {
        input = input.max_length(max_length);
    }

    CreateModal::new(form.custom_id(), form.title())
        .components(vec![CreateActionRow::InputText(input)])
}
