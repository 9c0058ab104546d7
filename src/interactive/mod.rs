//
//  gitlab-admin
//  interactive/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Terminal prompts used by `gla` commands

pub mod prompt;

pub use prompt::*;

/// Returns `true` when stdin is a terminal and prompts can be shown.
pub fn is_interactive() -> bool {
    console::user_attended()
}
