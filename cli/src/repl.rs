//! Interactive mode: one value per line, checked against a fixed pattern.

use condcfg::Pattern;
use miette::Result;
use reedline::{
    DefaultPrompt, DefaultPromptSegment, EditCommand, Emacs, KeyCode, KeyModifiers, Keybindings,
    Reedline, ReedlineEvent, Signal, default_emacs_keybindings,
};

use crate::check_input;

fn add_keybindings(keybindings: &mut Keybindings) {
    // Alt+Enter keeps a regex value on several lines.
    keybindings.add_binding(
        KeyModifiers::ALT,
        KeyCode::Enter,
        ReedlineEvent::Edit(vec![EditCommand::InsertNewline]),
    );
}

fn setup_reedline(pattern: &Pattern) -> (Reedline, DefaultPrompt) {
    let mut keybindings = default_emacs_keybindings();
    add_keybindings(&mut keybindings);

    let line_editor = Reedline::create().with_edit_mode(Box::new(Emacs::new(keybindings)));

    let prompt = DefaultPrompt::new(
        DefaultPromptSegment::Basic(pattern.source().to_string()),
        DefaultPromptSegment::Empty,
    );

    (line_editor, prompt)
}

pub fn run(pattern: &Pattern, as_string: bool) -> Result<()> {
    let (mut line_editor, prompt) = setup_reedline(pattern);

    println!("Checking values against '{pattern}' (Ctrl+D or Ctrl+C to exit)");

    loop {
        let sig = match line_editor.read_line(&prompt) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Reedline error: {e}");
                return Ok(());
            }
        };

        match sig {
            Signal::Success(buffer) => {
                if !buffer.trim().is_empty() {
                    check_input(pattern, &buffer, &buffer, as_string);
                }
            }
            Signal::CtrlD | Signal::CtrlC => {
                println!("\nGoodbye!");
                return Ok(());
            }
        }
    }
}
