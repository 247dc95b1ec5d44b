//! REPL (Read-Eval-Print Loop) for WHILE programs
//!
//! Every input line is a program run against one persistent environment, so
//! variables declared on one line can be used on the next.

use crate::interp::{Environment, Interpreter, Options};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::path::PathBuf;

const PROMPT: &str = "> ";
const HISTORY_FILE: &str = ".whilei_history";

/// REPL state
pub struct Repl {
    editor: DefaultEditor,
    interpreter: Interpreter,
    history_path: Option<PathBuf>,
}

impl Repl {
    /// Create a new REPL
    pub fn new(options: Options) -> RlResult<Self> {
        let editor = DefaultEditor::new()?;
        let interpreter = Interpreter::with_options(options);

        let history_path = dirs_home().map(|h| h.join(HISTORY_FILE));

        let mut repl = Repl {
            editor,
            interpreter,
            history_path,
        };

        if let Some(ref path) = repl.history_path {
            let _ = repl.editor.load_history(path);
        }

        Ok(repl)
    }

    /// Run the REPL
    pub fn run(&mut self) -> RlResult<()> {
        println!("whilei REPL v{}", env!("CARGO_PKG_VERSION"));
        println!("Type :help for help, :quit to exit.\n");

        loop {
            match self.editor.readline(PROMPT) {
                Ok(line) => {
                    let line = line.trim();

                    if line.is_empty() {
                        continue;
                    }

                    let _ = self.editor.add_history_entry(line);

                    if line.starts_with(':') {
                        if self.handle_command(line) {
                            break;
                        }
                        continue;
                    }

                    self.eval_input(line);
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Goodbye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {err}");
                    break;
                }
            }
        }

        if let Some(ref path) = self.history_path {
            let _ = self.editor.save_history(path);
        }

        Ok(())
    }

    /// Handle REPL commands (starting with :). Returns true to exit.
    fn handle_command(&mut self, cmd: &str) -> bool {
        match cmd {
            ":quit" | ":q" | ":exit" => {
                println!("Goodbye!");
                true
            }
            ":help" | ":h" | ":?" => {
                print_help();
                false
            }
            ":vars" | ":v" => {
                print!("{}", format_bindings(self.interpreter.env()));
                false
            }
            ":reset" => {
                self.interpreter.reset();
                println!("Environment cleared.");
                false
            }
            _ => {
                println!("Unknown command: {cmd}");
                println!("Type :help for help.");
                false
            }
        }
    }

    /// Run one line of WHILE source
    fn eval_input(&mut self, input: &str) {
        if let Err(err) = self.interpreter.run(input) {
            eprintln!("{} error: {err}", err.kind.category());
        }
    }
}

fn print_help() {
    println!("whilei REPL Commands:");
    println!("  :help, :h, :?   Show this help");
    println!("  :vars, :v       Show all variables");
    println!("  :reset          Forget all variables");
    println!("  :quit, :q       Exit the REPL");
    println!();
    println!("You can enter:");
    println!("  - Declarations: x := 2; y := inc(x)");
    println!("  - Assignments:  x = dec(x)");
    println!("  - Loops:        WHILE(x != y) DO x = inc(x) OD");
    println!();
    println!("Built-in functions: zero(), val(a), inc(a), dec(a)");
    println!("Comparisons: <  >  ==  !=");
}

/// One `name => value` line per binding, in declaration order
pub fn format_bindings(env: &Environment) -> String {
    env.iter().map(|var| format!("{var}\n")).collect()
}

/// Get home directory
fn dirs_home() -> Option<PathBuf> {
    #[cfg(windows)]
    {
        std::env::var("USERPROFILE").ok().map(PathBuf::from)
    }
    #[cfg(not(windows))]
    {
        std::env::var("HOME").ok().map(PathBuf::from)
    }
}
