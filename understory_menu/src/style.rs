// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One-shot stylesheet installation.

use alloc::string::String;

use crate::document::Document;
use crate::error::MenuError;
use crate::types::ElementId;

/// Default visual stylesheet. Hosts can replace it through [`Options`](crate::config::Options).
pub const DEFAULT_STYLESHEET: &str = "\
.context-menu{position:fixed;margin:0;padding:4px 0;list-style:none;\
border:1px solid #999;border-radius:3px;background:#eee;\
box-shadow:2px 2px 6px rgba(0,0,0,.3);font:14px sans-serif;z-index:1000;user-select:none}\
.context-menu li{position:relative;padding:4px 28px 4px 20px;white-space:nowrap}\
.context-menu li.heading{font-weight:bold}\
.context-menu li.divider{margin:4px 0;padding:0;border-bottom:1px solid #aaa}\
.context-menu li.disabled{color:#888}\
.context-menu li.interactive:hover{background:#4b8bf4;color:#fff;cursor:pointer}\
.context-menu li.submenu::after{content:'\\25B8';position:absolute;right:8px}\
.context-menu li.icon{padding-left:28px}\
.context-menu li>img{position:absolute;left:6px;width:16px;height:16px}\
.context-menu li>a{color:inherit;text-decoration:none}";

/// Inserts the menu stylesheet into the document head at most once.
#[derive(Clone, Debug)]
pub struct StyleInstaller {
    css: String,
    nonce: Option<String>,
    installed: Option<ElementId>,
}

impl StyleInstaller {
    /// Prepare an installer for the given stylesheet text.
    pub fn new(css: impl Into<String>) -> Self {
        Self {
            css: css.into(),
            nonce: None,
            installed: None,
        }
    }

    /// The installed `style` element, if any.
    pub fn installed(&self) -> Option<ElementId> {
        self.installed
    }

    /// Configured content-security nonce.
    pub fn nonce(&self) -> Option<&str> {
        self.nonce.as_deref()
    }

    /// Set the nonce written onto the `style` element.
    ///
    /// Fails once the stylesheet is installed; the nonce is left unchanged.
    pub fn set_nonce(&mut self, nonce: impl Into<String>) -> Result<(), MenuError> {
        if self.installed.is_some() {
            return Err(MenuError::NonceTooLate);
        }
        self.nonce = Some(nonce.into());
        Ok(())
    }

    /// Insert the stylesheet ahead of every other `style` element in the head.
    ///
    /// Later calls return the existing element without touching the document.
    pub fn install(&mut self, doc: &mut dyn Document) -> ElementId {
        if let Some(style) = self.installed {
            return style;
        }
        let style = doc.create_element("style");
        if let Some(nonce) = &self.nonce {
            doc.set_attribute(style, "nonce", nonce);
        }
        doc.set_text(style, &self.css);
        let head = doc.head();
        let first = doc
            .children(head)
            .into_iter()
            .find(|&c| doc.tag_name(c).as_deref() == Some("style"));
        doc.insert_before(head, style, first);
        log::debug!("installed menu stylesheet");
        self.installed = Some(style);
        style
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryDocument;
    use kurbo::Size;

    #[test]
    fn installs_once_as_first_style() {
        let mut doc = MemoryDocument::new(Size::new(800.0, 600.0));
        let head = doc.head();
        let link = doc.create_element("link");
        doc.append_child(head, link);
        let existing = doc.create_element("style");
        doc.append_child(head, existing);

        let mut installer = StyleInstaller::new("li{}");
        let style = installer.install(&mut doc);
        assert_eq!(doc.children(head), [link, style, existing]);
        assert_eq!(doc.text(style), "li{}");

        let again = installer.install(&mut doc);
        assert_eq!(again, style);
        assert_eq!(doc.children(head).len(), 3);
    }

    #[test]
    fn nonce_must_precede_install() {
        let mut doc = MemoryDocument::new(Size::new(800.0, 600.0));
        let mut installer = StyleInstaller::new(DEFAULT_STYLESHEET);
        installer.set_nonce("abc").unwrap();
        let style = installer.install(&mut doc);
        assert_eq!(doc.attribute(style, "nonce"), Some("abc"));

        assert_eq!(installer.set_nonce("late"), Err(MenuError::NonceTooLate));
        assert_eq!(installer.nonce(), Some("abc"));
    }
}
