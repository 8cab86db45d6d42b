//! Named word list management.
//!
//! # Invariants
//! - List names are unique across reserved and user lists.
//! - Reserved proficiency lists can neither be renamed nor deleted, and
//!   their membership is driven by record level tags, not user edits.
//! - Deleting a list strips its id from every member word.

use super::Lexicon;
use crate::error::{LexiconError, LexiconResult};
use crate::model::word::{ListId, WordId, WordList};
use log::info;

impl Lexicon {
    /// All lists with their ids, reserved lists first (store order).
    pub fn lists(&self) -> impl Iterator<Item = (ListId, &WordList)> {
        self.lists.iter().map(|(raw, list)| (ListId::new(raw), list))
    }

    pub fn list(&self, id: ListId) -> LexiconResult<&WordList> {
        self.lists
            .get(id.raw())
            .ok_or_else(|| LexiconError::NotFound(format!("list {id}")))
    }

    pub fn list_by_name(&self, name: &str) -> LexiconResult<ListId> {
        self.list_by_name
            .get(name)
            .copied()
            .ok_or_else(|| LexiconError::NotFound(format!("list `{name}`")))
    }

    pub fn create_list(&mut self, name: impl Into<String>) -> LexiconResult<ListId> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(LexiconError::InvalidRecord("list name is empty".into()));
        }
        if self.list_by_name.contains_key(&name) {
            return Err(LexiconError::DuplicateName(name));
        }
        let id = ListId::new(self.lists.add(WordList::named(name.clone())));
        self.list_by_name.insert(name.clone(), id);
        info!("event=list_created module=lexicon status=ok id={id} name={name}");
        Ok(id)
    }

    pub fn rename_list(&mut self, id: ListId, new_name: impl Into<String>) -> LexiconResult<()> {
        let new_name = new_name.into();
        if self.list_by_name.contains_key(&new_name) {
            return Err(LexiconError::DuplicateName(new_name));
        }
        let list = self
            .lists
            .get_mut(id.raw())
            .ok_or_else(|| LexiconError::NotFound(format!("list {id}")))?;
        if list.reserved {
            return Err(LexiconError::ReservedList(list.name.clone()));
        }
        let old_name = std::mem::replace(&mut list.name, new_name.clone());
        self.list_by_name.remove(&old_name);
        self.list_by_name.insert(new_name, id);
        Ok(())
    }

    /// Deletes a user list, stripping its id from every member word.
    pub fn delete_list(&mut self, id: ListId) -> LexiconResult<()> {
        {
            let list = self
                .lists
                .get(id.raw())
                .ok_or_else(|| LexiconError::NotFound(format!("list {id}")))?;
            if list.reserved {
                return Err(LexiconError::ReservedList(list.name.clone()));
            }
        }
        let Some(list) = self.lists.remove(id.raw()) else {
            return Err(LexiconError::NotFound(format!("list {id}")));
        };
        self.list_by_name.remove(&list.name);
        for member in list.members {
            if let Some(word) = self.words.get_mut(member.raw()) {
                word.list_membership.remove(&id);
            }
        }
        info!(
            "event=list_deleted module=lexicon status=ok id={id} name={}",
            list.name
        );
        Ok(())
    }

    pub fn set_auto_add(&mut self, id: ListId, auto_add: bool) -> LexiconResult<()> {
        let list = self
            .lists
            .get_mut(id.raw())
            .ok_or_else(|| LexiconError::NotFound(format!("list {id}")))?;
        list.auto_add = auto_add;
        Ok(())
    }

    /// User-driven membership add. Reserved lists are off limits here;
    /// their membership comes from record level tags.
    pub fn add_word_to_list(&mut self, word: WordId, list: ListId) -> LexiconResult<()> {
        self.check_user_list(list)?;
        self.word(word)?;
        self.link(word, list);
        Ok(())
    }

    pub fn remove_word_from_list(&mut self, word: WordId, list: ListId) -> LexiconResult<()> {
        self.check_user_list(list)?;
        self.word(word)?;
        self.unlink(word, list);
        Ok(())
    }

    fn check_user_list(&self, id: ListId) -> LexiconResult<()> {
        let list = self.list(id)?;
        if list.reserved {
            return Err(LexiconError::ReservedList(list.name.clone()));
        }
        Ok(())
    }
}
