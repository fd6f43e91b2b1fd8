//! In-memory discussion boards seeded with the site's sample data.
//!
//! Timestamps are relative to the moment the store is seeded, so threads
//! always look recently active.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForumCategory {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForumThread {
    pub id: String,
    pub category_id: String,
    pub title: String,
    pub author_id: String,
    pub created_at: DateTime<Utc>,
    pub last_reply_at: DateTime<Utc>,
    pub reply_count: u32,
    pub view_count: u32,
    pub is_sticky: bool,
    pub is_locked: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForumPost {
    pub id: String,
    pub thread_id: String,
    pub author_id: String,
    /// HTML produced by the rich text editor
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub upvotes: u32,
    pub is_best_answer: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ForumRole {
    Admin,
    Moderator,
    Member,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForumUser {
    pub id: String,
    pub name: String,
    pub avatar_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<ForumRole>,
}

#[derive(Debug, Clone, Default)]
pub struct ForumStore {
    categories: Vec<ForumCategory>,
    users: Vec<ForumUser>,
    threads: Vec<ForumThread>,
    posts: Vec<ForumPost>,
}

impl ForumStore {
    pub fn categories(&self) -> &[ForumCategory] {
        &self.categories
    }

    pub fn category_by_slug(&self, slug: &str) -> Option<&ForumCategory> {
        self.categories.iter().find(|category| category.slug == slug)
    }

    /// Threads in a category, sticky first, then most recent reply first
    pub fn threads_for_category(&self, category_id: &str) -> Vec<&ForumThread> {
        let mut threads: Vec<&ForumThread> = self
            .threads
            .iter()
            .filter(|thread| thread.category_id == category_id)
            .collect();
        threads.sort_by(|a, b| {
            b.is_sticky
                .cmp(&a.is_sticky)
                .then_with(|| b.last_reply_at.cmp(&a.last_reply_at))
        });
        threads
    }

    pub fn thread_by_id(&self, thread_id: &str) -> Option<&ForumThread> {
        self.threads.iter().find(|thread| thread.id == thread_id)
    }

    pub fn posts_for_thread(&self, thread_id: &str) -> Vec<&ForumPost> {
        self.posts
            .iter()
            .filter(|post| post.thread_id == thread_id)
            .collect()
    }

    pub fn user_by_id(&self, user_id: &str) -> Option<&ForumUser> {
        self.users.iter().find(|user| user.id == user_id)
    }

    /// Build the sample boards with timestamps relative to `now`
    pub fn seeded(now: DateTime<Utc>) -> Self {
        let ago = |minutes: i64| now - Duration::minutes(minutes);
        const HOUR: i64 = 60;
        const DAY: i64 = 24 * HOUR;

        let categories = [
            ("hw-help", "Homework Help", "Ask and answer questions related to assignments."),
            ("class-disc", "Class Discussions", "Discuss topics covered in specific classes."),
            ("study-groups", "Study Groups", "Form or join study groups."),
            ("announcements", "Announcements", "Official announcements from CES/Faculty."),
            ("extracurricular", "Extracurricular Activities", "Discuss clubs, sports, and events."),
            ("career-guidance", "College & Career Guidance", "Ask about applications, internships, careers."),
            ("resources", "Resources & Study Materials", "Share study guides, links, etc."),
            ("tech-support", "Technical Support", "Ask about school tech (LMS, software)."),
            ("feedback", "Feedback & Suggestions", "Give feedback on policies, suggest improvements."),
            ("guidelines", "Rules & Guidelines", "Forum rules and posting etiquette."),
        ]
        .into_iter()
        .map(|(slug, title, description)| ForumCategory {
            id: slug.to_string(),
            slug: slug.to_string(),
            title: title.to_string(),
            description: description.to_string(),
        })
        .collect();

        let users = [
            ("user1", "Lian Mae P.", "officer1", None),
            ("user2", "Ronald Z.", "dev3", None),
            ("user3", "Amalia R.", "leader2", None),
            ("admin1", "Admin User", "admin", Some(ForumRole::Admin)),
        ]
        .into_iter()
        .map(|(id, name, seed, role)| ForumUser {
            id: id.to_string(),
            name: name.to_string(),
            avatar_url: format!("https://picsum.photos/seed/{}/40/40", seed),
            role,
        })
        .collect();

        let threads = [
            ("thread1", "hw-help", "Struggling with Recursion Assignment", "user2", 2 * HOUR, 30, 3, 25, false, false),
            ("thread2", "hw-help", "Need help understanding Big O notation", "user3", DAY, 5 * HOUR, 5, 50, false, false),
            ("thread3", "announcements", "Upcoming Midterm Exam Schedule", "admin1", 2 * DAY, 2 * DAY, 0, 150, true, true),
            ("thread4", "class-disc", "Discussion: Pros and Cons of Python vs Java", "user1", 6 * HOUR, HOUR, 8, 75, false, false),
            ("thread5", "resources", "Useful Free Online Courses for Web Development", "user2", 3 * DAY, DAY, 2, 110, false, false),
        ]
        .into_iter()
        .map(
            |(id, category_id, title, author_id, created, last_reply, replies, views, sticky, locked)| {
                ForumThread {
                    id: id.to_string(),
                    category_id: category_id.to_string(),
                    title: title.to_string(),
                    author_id: author_id.to_string(),
                    created_at: ago(created),
                    last_reply_at: ago(last_reply),
                    reply_count: replies,
                    view_count: views,
                    is_sticky: sticky,
                    is_locked: locked,
                }
            },
        )
        .collect();

        let posts = [
            ("post1", "thread1", "user2", 2 * HOUR, 2, false,
                "<p>Hey everyone, I'm really stuck on the recursive function part of the latest assignment. Can anyone explain how the base case works in this context?</p>"),
            ("post2", "thread1", "user1", 90, 5, true,
                "<p>The base case is what stops the recursion! Think about the simplest possible input where you already know the answer. For factorials, it's usually factorial(0) or factorial(1) returning 1.</p><pre><code class='language-javascript'>function factorial(n) {\n  // Base case\n  if (n === 0 || n === 1) {\n    return 1;\n  }\n  // Recursive step\n  return n * factorial(n - 1);\n}</code></pre>"),
            ("post3", "thread1", "user3", HOUR, 3, false,
                "<p>Good explanation @user1! Also, make sure you're actually *reducing* the problem towards the base case in your recursive step (like `n - 1` in the factorial example).</p>"),
            ("post4", "thread1", "user2", 30, 1, false,
                "<p>Ah, that makes more sense now! Thanks, @user1 and @user3!</p>"),
            ("post5", "thread3", "admin1", 2 * DAY, 10, false,
                "<p>Please find the Midterm Exam schedule attached. Exams will run from June 5th to June 8th, 2025. Good luck!</p><p><a href='/link/to/schedule.pdf' target='_blank'>Midterm_Schedule.pdf</a></p>"),
            ("post6", "thread2", "user3", DAY, 1, false,
                "<p>Can someone provide a simple explanation of O(n^2) complexity?</p>"),
            ("post7", "thread2", "user1", 22 * HOUR, 4, false,
                "<p>Think of nested loops. If you have a loop inside another loop, and both loops iterate 'n' times based on the input size, the total operations grow quadratically (n * n). That's roughly O(n^2).</p>"),
            ("post8", "thread4", "user1", 6 * HOUR, 3, false,
                "<p>Let's discuss! I prefer Python for its readability and large library ecosystem, especially for data science and AI.</p>"),
            ("post9", "thread4", "user2", 5 * HOUR, 2, false,
                "<p>Java's strong typing and performance are great for large-scale enterprise applications though. The JVM is a powerful thing!</p>"),
        ]
        .into_iter()
        .map(|(id, thread_id, author_id, created, upvotes, best, content)| ForumPost {
            id: id.to_string(),
            thread_id: thread_id.to_string(),
            author_id: author_id.to_string(),
            content: content.to_string(),
            created_at: ago(created),
            upvotes,
            is_best_answer: best,
        })
        .collect();

        Self {
            categories,
            users,
            threads,
            posts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> ForumStore {
        ForumStore::seeded(Utc::now())
    }

    #[test]
    fn test_category_lookup() {
        let store = store();
        assert_eq!(store.categories().len(), 10);
        assert_eq!(
            store.category_by_slug("hw-help").map(|c| c.title.as_str()),
            Some("Homework Help")
        );
        assert!(store.category_by_slug("missing").is_none());
    }

    #[test]
    fn test_threads_sorted_by_latest_reply() {
        let store = store();
        let ids: Vec<&str> = store
            .threads_for_category("hw-help")
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(ids, vec!["thread1", "thread2"]);
        assert!(store.threads_for_category("guidelines").is_empty());
    }

    #[test]
    fn test_sticky_threads_come_first() {
        let now = Utc::now();
        let mut store = ForumStore::seeded(now);
        store.threads.push(ForumThread {
            id: "pinned".to_string(),
            category_id: "hw-help".to_string(),
            title: "Read before posting".to_string(),
            author_id: "admin1".to_string(),
            created_at: now - Duration::days(30),
            last_reply_at: now - Duration::days(30),
            reply_count: 0,
            view_count: 0,
            is_sticky: true,
            is_locked: true,
        });
        let first = store.threads_for_category("hw-help")[0];
        assert_eq!(first.id, "pinned");
    }

    #[test]
    fn test_posts_and_authors() {
        let store = store();
        let posts = store.posts_for_thread("thread1");
        assert_eq!(posts.len(), 4);
        assert_eq!(posts[0].id, "post1");
        assert!(posts[1].is_best_answer);
        assert!(store.posts_for_thread("thread5").is_empty());

        let admin = store.user_by_id("admin1").unwrap();
        assert_eq!(admin.role, Some(ForumRole::Admin));
        assert_eq!(admin.avatar_url, "https://picsum.photos/seed/admin/40/40");
        assert!(store.user_by_id("ghost").is_none());
    }

    #[test]
    fn test_thread_timestamps_relative_to_seed() {
        let now = Utc::now();
        let store = ForumStore::seeded(now);
        let thread = store.thread_by_id("thread1").unwrap();
        assert_eq!(thread.created_at, now - Duration::hours(2));
        assert_eq!(thread.last_reply_at, now - Duration::minutes(30));
    }
}
