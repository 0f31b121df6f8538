//! Persistence of the named editable-text and static-page records,
//! behind a narrow trait. The JSON file implementation is enough for
//! small sites; tests use the in-memory one.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::SystemTime;

use anyhow::{Result, Context, anyhow};
use kstring::KString;
use serde::{Serialize, Deserialize};

pub fn now_unixtime() -> i64 {
    let now = SystemTime::now();
    let now_unixtime: u64 = now.duration_since(SystemTime::UNIX_EPOCH)
        .expect("no overflows, we are after epoch").as_secs();
    now_unixtime as i64
}

/// A named piece of page text that admins can edit in place via the
/// save_term action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditableText {
    pub name: KString,
    pub content: String,
    /// Name of the page handler that first used the text.
    pub handler_name: KString,
    /// Unix time of the last create or save.
    pub last_used: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticPageRecord {
    pub url_name: KString,
    pub title: String,
    pub description: String,
    /// Already-sanitized HTML body.
    pub body: String,
    /// Whether the page is listed in sitemap.xml.
    pub sitemap: bool,
}

pub trait Store: Send + Sync {
    fn load_text(&self, name: &str) -> Result<Option<EditableText>>;
    fn save_text(&self, text: &EditableText) -> Result<()>;
    fn load_page(&self, url_name: &str) -> Result<Option<StaticPageRecord>>;
    fn save_page(&self, page: &StaticPageRecord) -> Result<()>;
    /// url_names of all pages flagged for the sitemap.
    fn sitemap_pages(&self) -> Result<Vec<KString>>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreData {
    texts: BTreeMap<KString, EditableText>,
    pages: BTreeMap<KString, StaticPageRecord>,
}

impl StoreData {
    fn sitemap_pages(&self) -> Vec<KString> {
        self.pages.values()
            .filter(|p| p.sitemap)
            .map(|p| p.url_name.clone())
            .collect()
    }
}

// ------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct MemStore {
    data: Mutex<StoreData>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemStore {
    fn load_text(&self, name: &str) -> Result<Option<EditableText>> {
        let data = self.data.lock().expect("not poisoned");
        Ok(data.texts.get(name).cloned())
    }
    fn save_text(&self, text: &EditableText) -> Result<()> {
        let mut data = self.data.lock().expect("not poisoned");
        data.texts.insert(text.name.clone(), text.clone());
        Ok(())
    }
    fn load_page(&self, url_name: &str) -> Result<Option<StaticPageRecord>> {
        let data = self.data.lock().expect("not poisoned");
        Ok(data.pages.get(url_name).cloned())
    }
    fn save_page(&self, page: &StaticPageRecord) -> Result<()> {
        let mut data = self.data.lock().expect("not poisoned");
        data.pages.insert(page.url_name.clone(), page.clone());
        Ok(())
    }
    fn sitemap_pages(&self) -> Result<Vec<KString>> {
        let data = self.data.lock().expect("not poisoned");
        Ok(data.sitemap_pages())
    }
}

// ------------------------------------------------------------------

/// One JSON file holding everything; rewritten on every save. The
/// whole store is behind one lock, writers don't race.
pub struct JsonFileStore {
    path: PathBuf,
    data: Mutex<StoreData>,
}

impl JsonFileStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let data = match std::fs::read_to_string(&path) {
            Ok(s) => serde_json::from_str(&s).with_context(
                || anyhow!("parsing store file {:?}", path.to_string_lossy()))?,
            Err(e) => match e.kind() {
                std::io::ErrorKind::NotFound => StoreData::default(),
                _ => return Err(e).with_context(
                    || anyhow!("reading store file {:?}", path.to_string_lossy())),
            }
        };
        Ok(JsonFileStore { path, data: Mutex::new(data) })
    }

    fn persist(&self, data: &StoreData) -> Result<()> {
        let tmp_path = self.path.with_extension("tmp");
        let s = serde_json::to_string_pretty(data)?;
        std::fs::write(&tmp_path, s).with_context(
            || anyhow!("writing store file {:?}", tmp_path.to_string_lossy()))?;
        std::fs::rename(&tmp_path, &self.path).with_context(
            || anyhow!("renaming store file to {:?}",
                       self.path.to_string_lossy()))?;
        Ok(())
    }
}

impl Store for JsonFileStore {
    fn load_text(&self, name: &str) -> Result<Option<EditableText>> {
        let data = self.data.lock().expect("not poisoned");
        Ok(data.texts.get(name).cloned())
    }
    fn save_text(&self, text: &EditableText) -> Result<()> {
        let mut data = self.data.lock().expect("not poisoned");
        data.texts.insert(text.name.clone(), text.clone());
        self.persist(&data)
    }
    fn load_page(&self, url_name: &str) -> Result<Option<StaticPageRecord>> {
        let data = self.data.lock().expect("not poisoned");
        Ok(data.pages.get(url_name).cloned())
    }
    fn save_page(&self, page: &StaticPageRecord) -> Result<()> {
        let mut data = self.data.lock().expect("not poisoned");
        data.pages.insert(page.url_name.clone(), page.clone());
        self.persist(&data)
    }
    fn sitemap_pages(&self) -> Result<Vec<KString>> {
        let data = self.data.lock().expect("not poisoned");
        Ok(data.sitemap_pages())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(name: &str, content: &str) -> EditableText {
        EditableText {
            name: KString::from_ref(name),
            content: content.into(),
            handler_name: KString::from_static("TestPage"),
            last_used: 0,
        }
    }

    #[test]
    fn t_memstore() {
        let store = MemStore::new();
        assert_eq!(store.load_text("greeting").unwrap(), None);
        store.save_text(&text("greeting", "hello")).unwrap();
        assert_eq!(store.load_text("greeting").unwrap().unwrap().content,
                   "hello");
    }

    #[test]
    fn t_sitemap_pages_only_flagged() {
        let store = MemStore::new();
        store.save_page(&StaticPageRecord {
            url_name: KString::from_static("about"),
            title: "About".into(),
            description: "".into(),
            body: "".into(),
            sitemap: true,
        }).unwrap();
        store.save_page(&StaticPageRecord {
            url_name: KString::from_static("imprint"),
            title: "Imprint".into(),
            description: "".into(),
            body: "".into(),
            sitemap: false,
        }).unwrap();
        assert_eq!(store.sitemap_pages().unwrap(),
                   vec![KString::from_static("about")]);
    }

    #[test]
    fn t_jsonfilestore_survives_reopen() {
        let dir = std::env::temp_dir().join(
            format!("pagekit-store-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("store.json");
        let _ = std::fs::remove_file(&path);
        {
            let store = JsonFileStore::open(&path).unwrap();
            store.save_text(&text("greeting", "hello")).unwrap();
        }
        {
            let store = JsonFileStore::open(&path).unwrap();
            assert_eq!(store.load_text("greeting").unwrap().unwrap().content,
                       "hello");
        }
        let _ = std::fs::remove_file(&path);
    }
}
