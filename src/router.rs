//! Path-segment routing: a trie keyed on path segments, with
//! longest-prefix lookup. The surplus of the path is handed to the
//! matched endpoint as positional arguments.

use std::collections::HashMap;
use std::fmt::Debug;

use anyhow::{Result, bail};
use kstring::KString;

use crate::{path::path_segments, ppath::PPath};

#[derive(Debug)]
struct TrieNode<T> {
    endpoint: Option<T>,
    children: HashMap<KString, TrieNode<T>>,
}

impl<T> TrieNode<T> {
    fn new() -> Self {
        TrieNode { endpoint: None, children: HashMap::new() }
    }
}

/// Allow single entries as endpoints; the longest registered prefix
/// of a request path wins.
#[derive(Debug)]
pub struct UniqueRouter<T>(TrieNode<T>);

impl<T> UniqueRouter<T> {
    pub fn new() -> UniqueRouter<T> {
        UniqueRouter(TrieNode::new())
    }

    /// Using path *strings*, and chaining.
    pub fn add(&mut self, path: &str, val: T) -> Result<&mut Self>
    where T: Debug
    {
        let mut node = &mut self.0;
        for segment in path_segments(path) {
            node = node.children.entry(KString::from_ref(segment))
                .or_insert_with(TrieNode::new);
        }
        match &node.endpoint {
            Some(old) => bail!("already contained an entry for {:?}: {:?}",
                               path, old),
            None => {
                node.endpoint = Some(val);
                Ok(self)
            }
        }
    }

    /// Longest-prefix lookup; returns the endpoint and the unused
    /// surplus of the path.
    pub fn get<S: AsRef<str> + Clone + Debug>(
        &self,
        path: &PPath<S>
    ) -> Option<(&T, PPath<S>)> {
        let segments = path.segments();
        let mut node = &self.0;
        let mut best: Option<(&T, usize)> = node.endpoint.as_ref().map(|e| (e, 0));
        for (i, segment) in segments.iter().enumerate() {
            match node.children.get(segment.as_ref()) {
                Some(child) => {
                    node = child;
                    if let Some(e) = &node.endpoint {
                        best = Some((e, i + 1));
                    }
                }
                None => break
            }
        }
        let (val, used) = best?;
        Some((val, PPath::new(false, path.ends_with_slash(),
                              segments[used..].to_vec())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_rest<'r>(r: &'r UniqueRouter<u32>, path: &str) -> Option<(&'r u32, String)> {
        let parsed: PPath<&str> = PPath::from_str(path);
        let p: PPath<KString> = PPath::new(
            parsed.is_absolute(),
            parsed.ends_with_slash(),
            parsed.segments().iter().map(|s| KString::from_ref(s)).collect());
        r.get(&p).map(|(v, rest)| (v, rest.to_string()))
    }

    #[test]
    fn t_add_duplicate() -> Result<()> {
        let mut r = UniqueRouter::new();
        r
            .add("/hello/world", 1)?
            .add("/index.html", 2)?;
        assert_eq!(r.add("/hello/world", 3).err().unwrap().to_string(),
                   "already contained an entry for \"/hello/world\": 1");
        Ok(())
    }

    #[test]
    fn t_get() -> Result<()> {
        let mut r = UniqueRouter::new();
        r
            .add("/", 0)?
            .add("/page", 1)?
            .add("/static", 2)?;
        assert_eq!(get_rest(&r, "/"), Some((&0, "./".to_string())));
        assert_eq!(get_rest(&r, "/page"), Some((&1, ".".to_string())));
        assert_eq!(get_rest(&r, "/page/about"), Some((&1, "about".to_string())));
        assert_eq!(get_rest(&r, "/static/js/base.js"),
                   Some((&2, "js/base.js".to_string())));
        assert_eq!(get_rest(&r, "/nothing/here"), Some((&0, "nothing/here".to_string())));
        Ok(())
    }

    #[test]
    fn t_get_no_root() -> Result<()> {
        let mut r = UniqueRouter::new();
        r.add("/page", 1)?;
        assert_eq!(get_rest(&r, "/"), None);
        assert_eq!(get_rest(&r, "/pages"), None);
        Ok(())
    }
}
