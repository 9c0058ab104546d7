//
//  gitlab-admin
//  tests/seeding_files.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use std::fs;

use gitlab_admin::util::{
    copy_tree, create_file_with_content, remove_dir_if_exists, replace_placeholder_in_file,
};

#[test]
fn template_copy_skips_git_and_overwrites() {
    let template = tempfile::tempdir().unwrap();
    let project = tempfile::tempdir().unwrap();

    create_file_with_content(template.path(), ".git/HEAD", "ref: refs/heads/main").unwrap();
    create_file_with_content(template.path(), "README.md", "# template").unwrap();
    create_file_with_content(template.path(), "infra/main.tf", "terraform {}").unwrap();
    create_file_with_content(project.path(), "README.md", "# demo").unwrap();

    let copied = copy_tree(template.path(), project.path()).unwrap();

    assert_eq!(copied, 2);
    assert!(!project.path().join(".git/HEAD").exists());
    assert_eq!(fs::read_to_string(project.path().join("README.md")).unwrap(), "# template");
    assert!(project.path().join("infra/main.tf").is_file());
}

#[test]
fn workload_placeholder_is_replaced_in_ci_file() {
    let dir = tempfile::tempdir().unwrap();
    create_file_with_content(
        dir.path(),
        ".gitlab-ci.yml",
        "variables:\n  TF_VAR_TFE_WORKSPACE_NAME: \"<enter-workload-name>\"\n  OTHER: \"<enter-workload-name>\"\n",
    )
    .unwrap();
    let ci_file = dir.path().join(".gitlab-ci.yml");

    let replaced = replace_placeholder_in_file(
        &ci_file,
        "TF_VAR_TFE_WORKSPACE_NAME",
        "\"<enter-workload-name>\"",
        "\"payments\"",
        ":",
    )
    .unwrap();

    assert_eq!(replaced, 1);
    assert_eq!(
        fs::read_to_string(&ci_file).unwrap(),
        "variables:\n  TF_VAR_TFE_WORKSPACE_NAME: \"payments\"\n  OTHER: \"<enter-workload-name>\"\n"
    );
}

#[test]
fn placeholder_with_other_value_is_left_alone() {
    let dir = tempfile::tempdir().unwrap();
    create_file_with_content(dir.path(), "app.env", "REGION=eu-west-1\n").unwrap();
    let path = dir.path().join("app.env");

    let replaced = replace_placeholder_in_file(&path, "REGION", "<region>", "us-east-1", "=").unwrap();

    assert_eq!(replaced, 0);
    assert_eq!(fs::read_to_string(&path).unwrap(), "REGION=eu-west-1\n");
}

#[test]
fn files_cannot_escape_their_directory() {
    let dir = tempfile::tempdir().unwrap();
    assert!(create_file_with_content(dir.path(), "../escape.txt", "x").is_err());
}

#[test]
fn removing_a_missing_folder_is_fine() {
    let dir = tempfile::tempdir().unwrap();
    let clone = dir.path().join("demo-tmp");

    remove_dir_if_exists(&clone).unwrap();

    create_file_with_content(&clone, "file.txt", "x").unwrap();
    remove_dir_if_exists(&clone).unwrap();
    assert!(!clone.exists());
}
