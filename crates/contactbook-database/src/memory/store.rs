//! Process-local implementation of every store trait.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use contactbook_core::error::AppError;
use contactbook_core::result::AppResult;
use contactbook_core::types::PageRequest;
use contactbook_entity::contact::{Contact, ContactDraft};
use contactbook_entity::person::{Person, PersonDraft};
use contactbook_entity::user::{CreateUser, User};

use crate::store::{ContactStore, PersonStore, UserStore, conflict};

/// Tables kept in insertion order, which doubles as creation order.
#[derive(Debug, Default)]
struct Tables {
    users: Vec<User>,
    persons: Vec<Person>,
    contacts: Vec<Contact>,
}

impl Tables {
    fn contacts_of(&self, user_id: Uuid) -> impl Iterator<Item = &Contact> {
        self.contacts.iter().filter(move |c| c.user_id == user_id)
    }

    fn persons_of(&self, user_id: Uuid) -> impl Iterator<Item = &Person> {
        self.persons.iter().filter(move |p| p.user_id == user_id)
    }

    /// Enforce the global email/phone unique indexes, ignoring `except`.
    fn check_contact_unique(&self, draft: &ContactDraft, except: Option<Uuid>) -> AppResult<()> {
        let others = self.contacts.iter().filter(|c| Some(c.id) != except);
        for other in others {
            if other.email == draft.email {
                return Err(AppError::conflict(conflict::CONTACT_EMAIL_TAKEN));
            }
            if other.phone == draft.phone {
                return Err(AppError::conflict(conflict::CONTACT_PHONE_TAKEN));
            }
        }
        Ok(())
    }

    fn check_person_unique(
        &self,
        user_id: Uuid,
        draft: &PersonDraft,
        except: Option<Uuid>,
    ) -> AppResult<()> {
        let taken = self
            .persons_of(user_id)
            .any(|p| Some(p.id) != except && p.has_name(&draft.first_name, &draft.last_name));
        if taken {
            return Err(AppError::conflict(conflict::PERSON_EXISTS));
        }
        Ok(())
    }

    /// Foreign key on `contacts (person_id, user_id)`.
    fn check_person_exists(&self, user_id: Uuid, person_id: Uuid) -> AppResult<()> {
        if self.persons_of(user_id).any(|p| p.id == person_id) {
            Ok(())
        } else {
            Err(AppError::not_found("Person not found"))
        }
    }
}

/// In-memory store with the same uniqueness, scoping, ordering, and
/// cascade rules as the PostgreSQL schema. Data is lost on drop.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        let mut tables = self.tables.write().await;
        if tables
            .users
            .iter()
            .any(|u| u.email.eq_ignore_ascii_case(&data.email))
        {
            return Err(AppError::conflict(conflict::ACCOUNT_EXISTS));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::now_v7(),
            username: data.username.clone(),
            email: data.email.clone(),
            password_hash: data.password_hash.clone(),
            avatar_url: None,
            refresh_token: None,
            created_at: now,
            updated_at: now,
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn update_avatar(&self, id: Uuid, avatar_url: &str) -> AppResult<Option<User>> {
        let mut tables = self.tables.write().await;
        Ok(tables.users.iter_mut().find(|u| u.id == id).map(|user| {
            user.avatar_url = Some(avatar_url.to_string());
            user.updated_at = Utc::now();
            user.clone()
        }))
    }

    async fn update_refresh_token(&self, id: Uuid, token: Option<&str>) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        if let Some(user) = tables.users.iter_mut().find(|u| u.id == id) {
            user.refresh_token = token.map(str::to_string);
            user.updated_at = Utc::now();
        }
        Ok(())
    }
}

#[async_trait]
impl PersonStore for MemoryStore {
    async fn find_all(&self, user_id: Uuid) -> AppResult<Vec<Person>> {
        let tables = self.tables.read().await;
        Ok(tables.persons_of(user_id).cloned().collect())
    }

    async fn find_by_id(&self, user_id: Uuid, id: Uuid) -> AppResult<Option<Person>> {
        let tables = self.tables.read().await;
        Ok(tables.persons_of(user_id).find(|p| p.id == id).cloned())
    }

    async fn find_by_first_name(&self, user_id: Uuid, first_name: &str) -> AppResult<Vec<Person>> {
        let tables = self.tables.read().await;
        Ok(tables
            .persons_of(user_id)
            .filter(|p| p.first_name == first_name)
            .cloned()
            .collect())
    }

    async fn find_by_last_name(&self, user_id: Uuid, last_name: &str) -> AppResult<Vec<Person>> {
        let tables = self.tables.read().await;
        Ok(tables
            .persons_of(user_id)
            .filter(|p| p.last_name == last_name)
            .cloned()
            .collect())
    }

    async fn create(&self, user_id: Uuid, data: &PersonDraft) -> AppResult<Person> {
        let mut tables = self.tables.write().await;
        tables.check_person_unique(user_id, data, None)?;

        let now = Utc::now();
        let person = Person {
            id: Uuid::now_v7(),
            user_id,
            first_name: data.first_name.clone(),
            last_name: data.last_name.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.persons.push(person.clone());
        Ok(person)
    }

    async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        data: &PersonDraft,
    ) -> AppResult<Option<Person>> {
        let mut tables = self.tables.write().await;
        if tables.persons_of(user_id).all(|p| p.id != id) {
            return Ok(None);
        }
        tables.check_person_unique(user_id, data, Some(id))?;

        let person = tables
            .persons
            .iter_mut()
            .find(|p| p.id == id && p.user_id == user_id)
            .map(|person| {
                person.first_name = data.first_name.clone();
                person.last_name = data.last_name.clone();
                person.updated_at = Utc::now();
                person.clone()
            });
        Ok(person)
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> AppResult<Option<Person>> {
        let mut tables = self.tables.write().await;
        let Some(index) = tables
            .persons
            .iter()
            .position(|p| p.id == id && p.user_id == user_id)
        else {
            return Ok(None);
        };

        let person = tables.persons.remove(index);
        tables.contacts.retain(|c| c.person_id != person.id);
        Ok(Some(person))
    }
}

#[async_trait]
impl ContactStore for MemoryStore {
    async fn find_all(&self, user_id: Uuid, page: &PageRequest) -> AppResult<Vec<Contact>> {
        let tables = self.tables.read().await;
        Ok(page.slice(tables.contacts_of(user_id).cloned()))
    }

    async fn find_by_user(&self, user_id: Uuid) -> AppResult<Vec<Contact>> {
        let tables = self.tables.read().await;
        Ok(tables.contacts_of(user_id).cloned().collect())
    }

    async fn find_by_id(&self, user_id: Uuid, id: Uuid) -> AppResult<Option<Contact>> {
        let tables = self.tables.read().await;
        Ok(tables.contacts_of(user_id).find(|c| c.id == id).cloned())
    }

    async fn find_by_email(&self, user_id: Uuid, email: &str) -> AppResult<Option<Contact>> {
        let tables = self.tables.read().await;
        Ok(tables.contacts_of(user_id).find(|c| c.email == email).cloned())
    }

    async fn find_all_by_email(&self, user_id: Uuid, email: &str) -> AppResult<Vec<Contact>> {
        let tables = self.tables.read().await;
        Ok(tables
            .contacts_of(user_id)
            .filter(|c| c.email == email)
            .cloned()
            .collect())
    }

    async fn find_by_phone(&self, user_id: Uuid, phone: &str) -> AppResult<Option<Contact>> {
        let tables = self.tables.read().await;
        Ok(tables.contacts_of(user_id).find(|c| c.phone == phone).cloned())
    }

    async fn find_by_person(&self, user_id: Uuid, person_id: Uuid) -> AppResult<Vec<Contact>> {
        let tables = self.tables.read().await;
        Ok(tables
            .contacts_of(user_id)
            .filter(|c| c.person_id == person_id)
            .cloned()
            .collect())
    }

    async fn create(&self, user_id: Uuid, data: &ContactDraft) -> AppResult<Contact> {
        let mut tables = self.tables.write().await;
        tables.check_person_exists(user_id, data.person_id)?;
        tables.check_contact_unique(data, None)?;

        let now = Utc::now();
        let contact = Contact {
            id: Uuid::now_v7(),
            user_id,
            person_id: data.person_id,
            date_of_birth: data.date_of_birth,
            email: data.email.clone(),
            phone: data.phone.clone(),
            note: data.note.clone(),
            blocked: data.blocked,
            created_at: now,
            updated_at: now,
        };
        tables.contacts.push(contact.clone());
        Ok(contact)
    }

    async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        data: &ContactDraft,
    ) -> AppResult<Option<Contact>> {
        let mut tables = self.tables.write().await;
        if tables.contacts_of(user_id).all(|c| c.id != id) {
            return Ok(None);
        }
        tables.check_person_exists(user_id, data.person_id)?;
        tables.check_contact_unique(data, Some(id))?;

        let now = Utc::now();
        Ok(tables
            .contacts
            .iter_mut()
            .find(|c| c.id == id && c.user_id == user_id)
            .map(|contact| {
                contact.apply(data, now);
                contact.clone()
            }))
    }

    async fn set_blocked(
        &self,
        user_id: Uuid,
        id: Uuid,
        blocked: bool,
    ) -> AppResult<Option<Contact>> {
        let mut tables = self.tables.write().await;
        Ok(tables
            .contacts
            .iter_mut()
            .find(|c| c.id == id && c.user_id == user_id)
            .map(|contact| {
                contact.blocked = blocked;
                contact.updated_at = Utc::now();
                contact.clone()
            }))
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> AppResult<Option<Contact>> {
        let mut tables = self.tables.write().await;
        let index = tables
            .contacts
            .iter()
            .position(|c| c.id == id && c.user_id == user_id);
        Ok(index.map(|i| tables.contacts.remove(i)))
    }
}
