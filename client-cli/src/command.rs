use client_common::form::{CloseReason, Event, FieldId};
use eyre::eyre;

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Event(Event),
    Show,
    Help,
}

pub const HELP: &str = "\
open                      open the modal
close | outside | cancel  close it with the button, a click outside, or escape
current [password]        type in the current password field
blur                      leave the current password field, checks it with the server
new [password]            type in the new password field
confirm [password]        type in the confirmation field
toggle current|new|confirm  show or hide a field
submit                    send the change
show                      print the form
help                      this message";

/// The argument is everything after the first space, so passwords may contain spaces
/// and keep their surrounding whitespace.
pub fn parse(line: &str) -> eyre::Result<Command> {
    let line = line.trim_start();
    let (word, arg) = match line.find(' ') {
        Some(i) => (&line[..i], &line[i + 1..]),
        None => (line, ""),
    };

    let command = match word {
        "open" => Command::Event(Event::Open),
        "close" => Command::Event(Event::Close(CloseReason::Button)),
        "outside" => Command::Event(Event::Close(CloseReason::Outside)),
        "cancel" => Command::Event(Event::Close(CloseReason::Cancel)),
        "current" => Command::Event(Event::Input(FieldId::Current, arg.to_owned())),
        "new" => Command::Event(Event::Input(FieldId::New, arg.to_owned())),
        "confirm" => Command::Event(Event::Input(FieldId::Confirm, arg.to_owned())),
        "blur" => Command::Event(Event::CurrentBlur),
        "toggle" => Command::Event(Event::ToggleVisibility(field(arg.trim())?)),
        "submit" => Command::Event(Event::Submit),
        "show" => Command::Show,
        "help" | "?" => Command::Help,
        "" => return Err(eyre!("empty command")),
        w => return Err(eyre!("unknown command {:?}, try help", w)),
    };
    Ok(command)
}

fn field(name: &str) -> eyre::Result<FieldId> {
    match name {
        "current" => Ok(FieldId::Current),
        "new" => Ok(FieldId::New),
        "confirm" => Ok(FieldId::Confirm),
        n => Err(eyre!("unknown field {:?}, expected current, new or confirm", n)),
    }
}
