/// Careful, this drops any empty segments, regardless whether at the
/// beginning, end or in the middle. This is useful for search
/// (iterating into a route trie), but can't be used as sole
/// information for path operations (e.g. adding paths).
pub fn path_segments<'s>(s: &'s str) -> impl Iterator<Item = &'s str>
{
    s.split('/').filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn t_path_segments() {
        let segs = |s| -> Vec<&str> { path_segments(s).collect() };
        assert_eq!(segs("/page/about"), vec!["page", "about"]);
        assert_eq!(segs("page//about/"), vec!["page", "about"]);
        assert_eq!(segs("/"), Vec::<&str>::new());
        assert_eq!(segs(""), Vec::<&str>::new());
    }
}
