//! Canned GitHub payloads
//!
//! Shapes follow the examples in GitHub's REST documentation, trimmed to the
//! fields the ghrest models read. Every field is non-null unless GitHub
//! documents it as nullable, so fixtures can be used for field-preservation
//! checks. [`with_nulls`] blanks fields GitHub is allowed to send as `null`.

use serde_json::{Value, json};

/// A user account
pub fn user(login: &str, id: u64) -> Value {
  json!({
    "login": login,
    "id": id,
    "node_id": "MDQ6VXNlcjE=",
    "avatar_url": format!("https://github.com/images/error/{login}_happy.gif"),
    "url": format!("https://api.github.com/users/{login}"),
    "html_url": format!("https://github.com/{login}"),
    "type": "User",
    "site_admin": false
  })
}

/// A team, as embedded in reviewer lists
pub fn team(slug: &str, id: u64) -> Value {
  json!({
    "id": id,
    "node_id": "MDQ6VGVhbTE=",
    "name": slug,
    "slug": slug,
    "description": "A great team.",
    "privacy": "closed",
    "permission": "admin",
    "url": format!("https://api.github.com/teams/{id}"),
    "html_url": format!("https://github.com/orgs/github/teams/{slug}")
  })
}

/// A repository summary owned by `octocat`
pub fn repository(name: &str) -> Value {
  json!({
    "id": 1296269,
    "node_id": "MDEwOlJlcG9zaXRvcnkxMjk2MjY5",
    "name": name,
    "full_name": format!("octocat/{name}"),
    "private": false,
    "owner": user("octocat", 1),
    "html_url": format!("https://github.com/octocat/{name}"),
    "description": "This your first repo!",
    "fork": false,
    "url": format!("https://api.github.com/repos/octocat/{name}")
  })
}

/// A workflow run; completed runs carry a `success` conclusion
pub fn workflow_run(id: u64, status: &str) -> Value {
  let conclusion = if status == "completed" { json!("success") } else { Value::Null };
  json!({
    "id": id,
    "name": "Build",
    "node_id": "MDEyOldvcmtmbG93IFJ1bjI2OTI4OQ==",
    "head_branch": "master",
    "head_sha": "acb5820ced9479c074f688cc328bf03f341a511d",
    "path": ".github/workflows/build.yml@main",
    "display_title": "Update README.md",
    "run_number": 562,
    "run_attempt": 1,
    "event": "push",
    "status": status,
    "conclusion": conclusion,
    "workflow_id": 159038,
    "check_suite_id": 414944374,
    "url": format!("https://api.github.com/repos/octo-org/octo-repo/actions/runs/{id}"),
    "html_url": format!("https://github.com/octo-org/octo-repo/actions/runs/{id}"),
    "jobs_url": format!("https://api.github.com/repos/octo-org/octo-repo/actions/runs/{id}/jobs"),
    "logs_url": format!("https://api.github.com/repos/octo-org/octo-repo/actions/runs/{id}/logs"),
    "created_at": "2020-01-22T19:33:08Z",
    "updated_at": "2020-01-22T19:33:08Z",
    "run_started_at": "2020-01-22T19:33:08Z",
    "actor": user("octocat", 1),
    "triggering_actor": user("octocat", 1),
    "pull_requests": [{
      "id": 17,
      "number": 1347,
      "url": "https://api.github.com/repos/octo-org/octo-repo/pulls/1347",
      "head": {"ref": "feature", "sha": "acb5820ced9479c074f688cc328bf03f341a511d", "repo": {"id": 1, "url": "https://api.github.com/repos/octo-org/octo-repo", "name": "octo-repo"}},
      "base": {"ref": "main", "sha": "009b8a3a9ccbb128af87f9b1c0f4c62e8a304f6d", "repo": {"id": 1, "url": "https://api.github.com/repos/octo-org/octo-repo", "name": "octo-repo"}}
    }],
    "head_commit": {
      "id": "acb5820ced9479c074f688cc328bf03f341a511d",
      "tree_id": "d23f6eedb1e1b9610bbc754ddb5197bfe7271223",
      "message": "Create linter.yaml",
      "timestamp": "2020-01-22T19:33:05Z",
      "author": {"name": "Mona Octocat", "email": "octocat@github.com"},
      "committer": {"name": "GitHub", "email": "noreply@github.com"}
    },
    "repository": repository("Hello-World")
  })
}

/// A job whose steps are named `steps`, numbered from 1
pub fn job(id: u64, steps: &[&str]) -> Value {
  let steps: Vec<Value> = steps
    .iter()
    .enumerate()
    .map(|(index, name)| {
      json!({
        "name": name,
        "status": "completed",
        "conclusion": "success",
        "number": index + 1,
        "started_at": "2020-01-20T09:42:40.000-07:00",
        "completed_at": "2020-01-20T09:42:41.000-07:00"
      })
    })
    .collect();

  json!({
    "id": id,
    "run_id": 29679449,
    "run_url": "https://api.github.com/repos/octo-org/octo-repo/actions/runs/29679449",
    "run_attempt": 1,
    "node_id": "MDEyOldvcmtmbG93IEpvYjM5OTQ0NDQ5Ng==",
    "head_sha": "f83a356604ae3c5d03e1b46ef4d1ca77d64a90b0",
    "head_branch": "main",
    "url": format!("https://api.github.com/repos/octo-org/octo-repo/actions/jobs/{id}"),
    "html_url": format!("https://github.com/octo-org/octo-repo/runs/{id}"),
    "status": "completed",
    "conclusion": "success",
    "created_at": "2020-01-20T17:42:40Z",
    "started_at": "2020-01-20T17:42:40Z",
    "completed_at": "2020-01-20T17:44:39Z",
    "name": "build",
    "workflow_name": "CI",
    "steps": steps,
    "labels": ["ubuntu-latest"],
    "runner_id": 1,
    "runner_name": "my runner"
  })
}

/// A fully expanded branch (as returned by the single-branch endpoint)
pub fn branch(name: &str, sha: &str) -> Value {
  json!({
    "name": name,
    "commit": {
      "sha": sha,
      "node_id": "MDY6Q29tbWl0MTI5NjI2OTpjNWI5N2Q1YWU2YzE5ZDVjNWRmNzFhMzRjN2ZiZWVkYTI0NzljY2Jj",
      "url": format!("https://api.github.com/repos/octocat/Hello-World/commits/{sha}"),
      "html_url": format!("https://github.com/octocat/Hello-World/commit/{sha}"),
      "commit": {
        "message": "Fix all the bugs\n\nAnd add a test",
        "author": {"name": "The Octocat", "email": "octocat@nowhere.com", "date": "2012-03-06T15:06:50-08:00"},
        "committer": {"name": "The Octocat", "email": "octocat@nowhere.com", "date": "2012-03-06T15:06:50-08:00"},
        "comment_count": 0,
        "url": format!("https://api.github.com/repos/octocat/Hello-World/git/commits/{sha}")
      },
      "author": user("octocat", 1),
      "committer": user("octocat", 1),
      "parents": [{
        "sha": "553c2077f0edc3d5dc5d17262f6aa498e69d6f8e",
        "url": "https://api.github.com/repos/octocat/Hello-World/commits/553c2077f0edc3d5dc5d17262f6aa498e69d6f8e"
      }]
    },
    "protected": true,
    "protection": {
      "enabled": true,
      "required_status_checks": {"enforcement_level": "non_admins", "contexts": ["ci"]}
    },
    "protection_url": format!("https://api.github.com/repos/octocat/Hello-World/branches/{name}/protection")
  })
}

/// A deployment created by `octocat`
pub fn deployment(id: u64, environment: &str) -> Value {
  json!({
    "url": format!("https://api.github.com/repos/octocat/example/deployments/{id}"),
    "id": id,
    "node_id": "MDEwOkRlcGxveW1lbnQx",
    "sha": "a84d88e7554fc1fa21bcbc4efae3c782a70d2b9d",
    "ref": "topic-branch",
    "task": "deploy",
    "payload": {"deploy": "migrate"},
    "original_environment": environment,
    "environment": environment,
    "description": "Deploy request from hubot",
    "creator": user("octocat", 1),
    "created_at": "2012-07-20T01:19:13Z",
    "updated_at": "2012-07-20T01:19:13Z",
    "statuses_url": format!("https://api.github.com/repos/octocat/example/deployments/{id}/statuses"),
    "repository_url": "https://api.github.com/repos/octocat/example",
    "transient_environment": false,
    "production_environment": true
  })
}

/// An unread issue notification in `octocat/Hello-World`
pub fn notification(id: &str, title: &str) -> Value {
  json!({
    "id": id,
    "repository": repository("Hello-World"),
    "subject": {
      "title": title,
      "url": "https://api.github.com/repos/octokit/octokit.rb/issues/123",
      "latest_comment_url": "https://api.github.com/repos/octokit/octokit.rb/issues/comments/123",
      "type": "Issue"
    },
    "reason": "subscribed",
    "unread": true,
    "updated_at": "2014-11-07T22:01:45Z",
    "last_read_at": "2014-11-07T22:01:45Z",
    "url": format!("https://api.github.com/notifications/threads/{id}"),
    "subscription_url": format!("https://api.github.com/notifications/threads/{id}/subscription")
  })
}

/// An active repository webhook for push and pull request events
pub fn webhook(id: u64, url: &str) -> Value {
  json!({
    "type": "Repository",
    "id": id,
    "name": "web",
    "active": true,
    "events": ["push", "pull_request"],
    "config": {"content_type": "json", "insecure_ssl": "0", "url": url},
    "updated_at": "2019-06-03T00:57:16Z",
    "created_at": "2019-06-03T00:57:16Z",
    "url": format!("https://api.github.com/repos/octocat/Hello-World/hooks/{id}"),
    "test_url": format!("https://api.github.com/repos/octocat/Hello-World/hooks/{id}/test"),
    "ping_url": format!("https://api.github.com/repos/octocat/Hello-World/hooks/{id}/pings"),
    "deliveries_url": format!("https://api.github.com/repos/octocat/Hello-World/hooks/{id}/deliveries"),
    "last_response": {"code": null, "status": "unused", "message": null}
  })
}

/// A webhook whose config carries `insecure_ssl` as a JSON number
pub fn webhook_with_numeric_insecure_ssl(id: u64, url: &str, insecure_ssl: u64) -> Value {
  let mut hook = webhook(id, url);
  hook["config"]["insecure_ssl"] = json!(insecure_ssl);
  hook
}

/// Replace the given top-level fields of a payload with `null`
pub fn with_nulls(mut payload: Value, fields: &[&str]) -> Value {
  if let Some(object) = payload.as_object_mut() {
    for field in fields {
      object.insert((*field).to_string(), Value::Null);
    }
  }
  payload
}

/// An available codespace on an 8-core machine
pub fn codespace(id: u64, name: &str) -> Value {
  json!({
    "id": id,
    "name": name,
    "display_name": "musical space parakeet",
    "environment_id": "26a7c758-7299-4a73-b978-5a92a7ae98a0",
    "owner": user("octocat", 1),
    "billable_owner": user("octocat", 1),
    "repository": repository("Hello-World"),
    "machine": {
      "name": "standardLinux",
      "display_name": "4 cores, 8 GB RAM, 64 GB storage",
      "operating_system": "linux",
      "storage_in_bytes": 68719476736u64,
      "memory_in_bytes": 8589934592u64,
      "cpus": 8
    },
    "prebuild": false,
    "created_at": "2021-10-14T00:53:30-06:00",
    "updated_at": "2021-10-14T00:53:32-06:00",
    "last_used_at": "2021-10-14T00:53:30-06:00",
    "state": "Available",
    "url": format!("https://api.github.com/user/codespaces/{name}"),
    "git_status": {
      "ahead": 0,
      "behind": 0,
      "has_unpushed_changes": false,
      "has_uncommitted_changes": false,
      "ref": "main"
    },
    "location": "WestUs2",
    "idle_timeout_minutes": 60,
    "web_url": format!("https://{name}.github.dev"),
    "machines_url": format!("https://api.github.com/user/codespaces/{name}/machines"),
    "start_url": format!("https://api.github.com/user/codespaces/{name}/start"),
    "stop_url": format!("https://api.github.com/user/codespaces/{name}/stop")
  })
}

/// A flat-rate marketplace plan
pub fn plan(id: u64, name: &str) -> Value {
  json!({
    "url": format!("https://api.github.com/marketplace_listing/plans/{id}"),
    "accounts_url": format!("https://api.github.com/marketplace_listing/plans/{id}/accounts"),
    "id": id,
    "number": 3,
    "name": name,
    "description": "A professional-grade CI solution",
    "monthly_price_in_cents": 1099,
    "yearly_price_in_cents": 11870,
    "price_model": "FLAT_RATE",
    "has_free_trial": true,
    "unit_name": null,
    "state": "published",
    "bullets": ["Up to 25 private repositories", "11 concurrent builds"]
  })
}

/// An open issue assigned to `assignees` (the first one is the primary
/// assignee)
pub fn issue(number: u64, assignees: &[&str]) -> Value {
  let users: Vec<Value> = assignees
    .iter()
    .enumerate()
    .map(|(index, login)| user(login, index as u64 + 1))
    .collect();
  let assignee = users.first().cloned().unwrap_or(Value::Null);

  json!({
    "id": 1,
    "node_id": "MDU6SXNzdWUx",
    "url": format!("https://api.github.com/repos/octocat/Hello-World/issues/{number}"),
    "html_url": format!("https://github.com/octocat/Hello-World/issues/{number}"),
    "number": number,
    "state": "open",
    "title": "Found a bug",
    "body": "I'm having a problem with this.",
    "user": user("octocat", 1),
    "labels": [{
      "id": 208045946,
      "node_id": "MDU6TGFiZWwyMDgwNDU5NDY=",
      "name": "bug",
      "description": "Something isn't working",
      "color": "f29513",
      "default": true
    }],
    "assignee": assignee,
    "assignees": users,
    "locked": false,
    "comments": 0,
    "closed_at": null,
    "created_at": "2011-04-22T13:33:48Z",
    "updated_at": "2011-04-22T13:33:48Z"
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_with_nulls_only_touches_named_fields() {
    let run = with_nulls(workflow_run(1, "queued"), &["name", "head_branch"]);
    assert_eq!(run["name"], Value::Null);
    assert_eq!(run["head_branch"], Value::Null);
    assert_eq!(run["id"], json!(1));
  }
}
