//! Action dispatch: each page type declares a closed table of the
//! actions it exposes; anything not in the table is rejected with a
//! typed error instead of being looked up dynamically.

use kstring::KString;

use crate::page::PageState;

#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    #[error("unknown action {0:?}")]
    UnknownAction(KString),
    #[error("missing action argument {0:?}")]
    MissingArgument(KString),
    #[error("action {0:?} requires edit mode")]
    EditModeRequired(KString),
}

/// The arguments an action receives: the route's positional path
/// arguments plus every POST field that isn't part of the dispatch
/// protocol itself.
#[derive(Debug, Default)]
pub struct ActionArgs {
    path_args: Vec<KString>,
    fields: Vec<(KString, String)>, // submission order
}

impl ActionArgs {
    pub fn new(path_args: Vec<KString>) -> Self {
        ActionArgs { path_args, fields: Vec::new() }
    }

    pub fn push(&mut self, name: &str, value: String) {
        self.fields.push((KString::from_ref(name), value));
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v.as_str())
    }

    /// Like `get` but reports the missing argument as a typed error.
    pub fn xget(&self, name: &str) -> Result<&str, ActionError> {
        self.get(name).ok_or_else(
            || ActionError::MissingArgument(KString::from_ref(name)))
    }

    pub fn path_args(&self) -> &[KString] {
        &self.path_args
    }

    pub fn iter(&self) -> impl Iterator<Item = (&KString, &str)> {
        self.fields.iter().map(|(n, v)| (n, v.as_str()))
    }
}

pub type ActionFn<P> = fn(&P, &mut PageState, &ActionArgs) -> anyhow::Result<()>;

/// The allow-list of actions for one page type, in declaration
/// order. Small enough that linear lookup is fine.
pub struct ActionTable<P> {
    entries: Vec<(&'static str, ActionFn<P>)>,
}

impl<P> ActionTable<P> {
    pub fn new() -> Self {
        ActionTable { entries: Vec::new() }
    }

    pub fn with(mut self, name: &'static str, f: ActionFn<P>) -> Self {
        debug_assert!(! self.entries.iter().any(|(n, _)| *n == name),
                      "action declared twice: {name:?}");
        self.entries.push((name, f));
        self
    }

    pub fn get(&self, name: &str) -> Option<ActionFn<P>> {
        self.entries.iter().find(|(n, _)| *n == name).map(|(_, f)| *f)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(n, _)| *n)
    }
}

impl<P> Default for ActionTable<P> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn t_args() {
        let mut args = ActionArgs::new(vec![KString::from_ref("about")]);
        args.push("text", "hello".into());
        args.push("count", "3".into());
        assert_eq!(args.get("text"), Some("hello"));
        assert_eq!(args.get("missing"), None);
        assert_eq!(args.xget("count").unwrap(), "3");
        assert!(matches!(args.xget("missing"),
                         Err(ActionError::MissingArgument(_))));
        assert_eq!(args.path_args().len(), 1);
    }
}
