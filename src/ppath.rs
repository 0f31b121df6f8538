//! Paths independent of the local file system (pure
//! functions). E.g. for use in web applications.

//! Does not concern itself with handling ".." or ".", i.e. does not
//! offer canonicalization.

use std::fmt::Debug;

use crate::{path::path_segments, util::{first, rest}};

#[derive(Clone, Debug, PartialEq)]
pub struct PPath<Segment: Clone + Debug> {
    is_absolute: bool,
    ends_with_slash: bool,
    segments: Vec<Segment>, // without empty ones
}

impl<'s, S> PPath<S>
where S: From<&'s str> + Clone + Debug + 's
{
    pub fn from_str(s: &'s str) -> Self {
        // XX allow the empty string?
        let is_absolute = s.chars().next() == Some('/');
        let ends_with_slash = s.chars().last() == Some('/');
        PPath {
            is_absolute,
            ends_with_slash,
            segments: path_segments(s).map(|v| S::from(v)).collect()
        }
    }
}

impl<S> PPath<S>
where S: AsRef<str> + Clone + Debug
{
    pub fn to_string(&self) -> String {
        let mut s = String::new();
        if self.is_absolute {
            s.push('/');
        }
        if self.segments.is_empty() {
            if ! self.is_absolute {
                s.push('.');
                if self.ends_with_slash {
                    s.push('/');
                }
            }
        } else {
            let mut seen = false;
            for p in &self.segments {
                if seen {
                    s.push('/');
                }
                s.push_str(p.as_ref());
                seen = true;
            }
            if self.ends_with_slash {
                s.push('/');
            }
        }
        s
    }

    /// More efficient than parsing `other` into a `PPath` and
    /// comparing afterwards, and ignores differences on is_absolute
    /// and ends_with_slash!
    pub fn same_document_as_path_str(&self, other: &str) -> bool {
        itertools::equal(self.segments.iter().map(|v| v.as_ref()),
                         path_segments(other))
    }
}

impl<S: Clone + Debug> PPath<S> {
    pub fn new(is_absolute: bool,
               ends_with_slash: bool,
               segments: Vec<S>
    ) -> Self {
        PPath { is_absolute, ends_with_slash, segments }
    }
    pub fn is_absolute(&self) -> bool {
        self.is_absolute
    }
    pub fn ends_with_slash(&self) -> bool {
        self.ends_with_slash
    }
    /// without empty ones
    pub fn segments(&self) -> &[S] {
        &self.segments
    }

    pub fn first(&self) -> Option<S> {
        first(&self.segments).cloned()
    }

    pub fn rest(&self) -> Option<Self> {
        Some(PPath {
            is_absolute: false,
            ends_with_slash: self.ends_with_slash,
            segments: rest(&self.segments)?.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn t_from_str() {
        let p: PPath<&str> = PPath::from_str("/page/about");
        assert!(p.is_absolute());
        assert!(! p.ends_with_slash());
        assert_eq!(p.segments(), &["page", "about"]);
        assert_eq!(p.to_string(), "/page/about");

        let p: PPath<&str> = PPath::from_str("page//about/");
        assert!(! p.is_absolute());
        assert!(p.ends_with_slash());
        assert_eq!(p.to_string(), "page/about/");

        let p: PPath<&str> = PPath::from_str("");
        assert_eq!(p.segments(), &[] as &[&str]);
        assert_eq!(p.to_string(), ".");
    }

    #[test]
    fn t_first_rest() {
        let p: PPath<&str> = PPath::from_str("/page/about");
        assert_eq!(p.first(), Some("page"));
        let r = p.rest().unwrap();
        assert!(! r.is_absolute());
        assert_eq!(r.segments(), &["about"]);
        let rr = r.rest().unwrap();
        assert_eq!(rr.rest(), None);
    }

    #[test]
    fn t_same_document() {
        let p: PPath<&str> = PPath::from_str("/page/about/");
        assert!(p.same_document_as_path_str("page//about"));
        assert!(! p.same_document_as_path_str("/page"));
    }
}
