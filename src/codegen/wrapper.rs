//! Builder for a single `@tool` wrapper function.
//!
//! A wrapper is assembled from three slots that can be rendered on their
//! own: [`ToolWrapper::signature`], [`ToolWrapper::docstring`] and
//! [`ToolWrapper::body`].

use crate::ident::parameter_identifier;
use crate::models::ToolSpec;
use crate::params::{tokenize, Segment};

use super::python::{docstring_text, string_literal};

/// Indentation used inside generated function bodies.
const INDENT: &str = "    ";

/// A parameter as it appears in the generated function.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Argument {
    /// Placeholder name in the command template.
    placeholder: String,
    /// Python identifier used in the signature and body.
    ident: String,
    description: String,
}

/// Renders one [`ToolSpec`] as a Python tool function.
#[derive(Debug, Clone)]
pub struct ToolWrapper<'a> {
    spec: &'a ToolSpec,
    args: Vec<Argument>,
    quote_arguments: bool,
}

impl<'a> ToolWrapper<'a> {
    #[must_use]
    pub fn new(spec: &'a ToolSpec) -> Self {
        let mut args: Vec<Argument> = Vec::with_capacity(spec.parameters.len());
        for param in &spec.parameters {
            let base = parameter_identifier(&param.name);
            let mut ident = base.clone();
            let mut n = 2;
            while args.iter().any(|a| a.ident == ident) {
                ident = format!("{base}_{n}");
                n += 1;
            }
            args.push(Argument {
                placeholder: param.name.clone(),
                ident,
                description: param.description.clone(),
            });
        }
        Self {
            spec,
            args,
            quote_arguments: false,
        }
    }

    /// Wrap substituted values in `shlex.quote(...)`.
    #[must_use]
    pub fn quote_arguments(mut self, quote: bool) -> Self {
        self.quote_arguments = quote;
        self
    }

    /// `def name(a: str, b: str) -> str:`
    #[must_use]
    pub fn signature(&self) -> String {
        let params = self
            .args
            .iter()
            .map(|a| format!("{}: str", a.ident))
            .collect::<Vec<_>>()
            .join(", ");
        format!("def {}({params}) -> str:\n", self.spec.name)
    }

    /// Purpose line, `Args:` (only when there are parameters), `Returns:`.
    #[must_use]
    pub fn docstring(&self) -> String {
        let mut purpose = docstring_text(&self.spec.description);
        if !purpose.ends_with(['.', '!', '?']) {
            purpose.push('.');
        }

        let mut out = format!("{INDENT}\"\"\"\n{INDENT}{purpose}\n");
        if !self.args.is_empty() {
            out.push_str(&format!("\n{INDENT}Args:\n"));
            for arg in &self.args {
                out.push_str(&format!(
                    "{INDENT}{INDENT}{}: {}\n",
                    arg.ident,
                    docstring_text(&arg.description)
                ));
            }
        }
        out.push_str(&format!(
            "\n{INDENT}Returns:\n\
             {INDENT}{INDENT}Command output as string\n\
             {INDENT}\"\"\"\n"
        ));
        out
    }

    /// Python expression that builds the command string.
    ///
    /// Literal text becomes escaped string literals and every placeholder,
    /// whichever syntax it was written in, becomes the matching argument.
    #[must_use]
    pub fn command_expr(&self) -> String {
        let parts: Vec<String> = tokenize(&self.spec.command)
            .into_iter()
            .map(|segment| match segment {
                Segment::Literal(text) => string_literal(text),
                Segment::Placeholder { name, .. } => {
                    let ident = self
                        .args
                        .iter()
                        .find(|a| a.placeholder == name)
                        .map_or_else(|| parameter_identifier(name), |a| a.ident.clone());
                    if self.quote_arguments {
                        format!("shlex.quote({ident})")
                    } else {
                        ident
                    }
                }
            })
            .collect();
        if parts.is_empty() {
            string_literal("")
        } else {
            parts.join(" + ")
        }
    }

    /// Build the command, run it through the shell, return stdout or stderr.
    ///
    /// A non-zero exit is reported through the return value, never raised.
    #[must_use]
    pub fn body(&self) -> String {
        format!(
            "{INDENT}command = {expr}\n\
             {INDENT}result = subprocess.run(\n\
             {INDENT}{INDENT}command,\n\
             {INDENT}{INDENT}shell=True,\n\
             {INDENT}{INDENT}capture_output=True,\n\
             {INDENT}{INDENT}text=True,\n\
             {INDENT})\n\
             {INDENT}return result.stdout if result.returncode == 0 else result.stderr\n",
            expr = self.command_expr()
        )
    }

    /// The complete decorated function.
    #[must_use]
    pub fn render(&self) -> String {
        format!(
            "@tool\n{}{}{}",
            self.signature(),
            self.docstring(),
            self.body()
        )
    }
}
