//! Menu choices as enums.
//!
//! Each menu maps the digit a user types to a command. Anything else is
//! `None` and the caller redisplays the menu.

/// Top-level role selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub const MENU: &'static str =
        "\nWelcome to the Student Management System\n1. Login as Admin\n2. Continue as User";

    pub fn from_choice(choice: &str) -> Option<Self> {
        match choice.trim() {
            "1" => Some(Role::Admin),
            "2" => Some(Role::User),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminCommand {
    Add,
    List,
    Search,
    Delete,
    Update,
    Logout,
}

impl AdminCommand {
    pub const MENU: &'static str = "\nAdmin Menu\n\
        1. Add Student\n\
        2. Display Students\n\
        3. Search Student\n\
        4. Delete Student\n\
        5. Update Student\n\
        6. Logout";

    pub fn from_choice(choice: &str) -> Option<Self> {
        match choice.trim() {
            "1" => Some(AdminCommand::Add),
            "2" => Some(AdminCommand::List),
            "3" => Some(AdminCommand::Search),
            "4" => Some(AdminCommand::Delete),
            "5" => Some(AdminCommand::Update),
            "6" => Some(AdminCommand::Logout),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserCommand {
    List,
    Search,
    Exit,
}

impl UserCommand {
    pub const MENU: &'static str = "\nUser Menu\n\
        1. Display Students\n\
        2. Search Student\n\
        3. Exit";

    pub fn from_choice(choice: &str) -> Option<Self> {
        match choice.trim() {
            "1" => Some(UserCommand::List),
            "2" => Some(UserCommand::Search),
            "3" => Some(UserCommand::Exit),
            _ => None,
        }
    }
}
