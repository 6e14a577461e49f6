//! Leptos components for the tutor page.
//!
//! Components receive plain view-model rows; they hold no state and run no
//! domain logic. Every interaction is a regular HTML form post handled by
//! `routes::page`.

use leptos::prelude::*;

use super::{FeedbackRow, IdeaRow, ReferenceOption, ViewModel, stamped_line};
use crate::services::chat::ChatMessage;
use crate::services::session::{Notice, NoticeLevel};

const PAGE_CSS: &str = r"
#root-columns { display: grid; grid-template-columns: 3fr 1fr; gap: 2rem; padding: 1rem; }
body { font-family: system-ui, sans-serif; margin: 0; background: #ffffff; }
body.layout--centered #root-columns { max-width: 960px; margin: 0 auto; }
.chat-container { background-color: #f0f2f6; padding: 1.5rem; border-radius: 0.5rem; border: 5px solid #ef4444; }
.idea-container { background: linear-gradient(180deg, #f3f4f6 0%, #e5e7eb 100%); padding: 1.5rem; border-radius: 0.5rem; border: 5px solid #22c55e; }
.panel-divider { height: 40px; background-color: #22c55e; border-radius: 8px; margin: 1.5rem 0 1.8rem 0; }
.caption { color: #6b7280; }
.info { background: #e0f2fe; padding: 0.75rem; border-radius: 0.5rem; }
.notice { padding: 0.75rem 1rem; margin: 1rem; border-radius: 0.5rem; }
.notice--warning { background: #fef3c7; }
.notice--success { background: #dcfce7; }
.chat-panel__message { padding: 0.5rem 0.75rem; margin: 0.5rem 0; border-radius: 0.5rem; background: #ffffff; }
.chat-panel__role { font-weight: 600; margin-right: 0.5rem; }
.chat-panel__text { white-space: pre-wrap; }
.chat-panel__empty { color: #6b7280; }
.chat-panel__input-row { display: flex; gap: 0.5rem; }
.chat-panel__input { flex: 1; }
textarea { width: 100%; box-sizing: border-box; }
.btn { width: 100%; margin-top: 0.5rem; }
.chat-panel__input-row .btn { width: auto; margin-top: 0; }
.entry-list { padding-left: 1.2rem; }
.entry-list__reference { color: #4b5563; display: block; }
.page-header { display: flex; justify-content: space-between; align-items: flex-start; }
.end-session .btn { width: auto; }
.btn--quiet { background: transparent; border: 1px solid #9ca3af; }
.idea-panel__reference { display: block; margin-top: 0.5rem; }
";

/// Full HTML document: main column (title, reference picker, chat) and side
/// column (ideas, feedback).
///
/// The picker and the chat input share one form, so the selection on screen
/// is the one the question is answered with.
#[component]
pub fn TutorPage(vm: ViewModel) -> impl IntoView {
    let ViewModel { title, caption, layout, references, chat, ideas, feedback, notice, .. } = vm;
    let body_class = layout.css_class();
    let idea_references = references.clone();

    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <title>{title}</title>
                <style inner_html=PAGE_CSS></style>
            </head>
            <body class=body_class>
                <NoticeBanner notice=notice/>
                <div id="root-columns">
                    <main class="chat-container">
                        <header class="page-header">
                            <div>
                                <h1>{title}</h1>
                                <p class="caption">{caption}</p>
                            </div>
                            <EndSessionButton/>
                        </header>
                        <hr/>
                        <form class="tutor-form" method="post" action="/chat">
                            <ReferenceSelector options=references/>
                            <hr/>
                            <ChatPanel messages=chat/>
                        </form>
                    </main>
                    <aside class="idea-container">
                        <IdeaPanel ideas=ideas references=idea_references/>
                        <div class="panel-divider"></div>
                        <FeedbackPanel entries=feedback/>
                    </aside>
                </div>
            </body>
        </html>
    }
}

/// Warning or confirmation left by the previous form post.
#[component]
pub fn NoticeBanner(notice: Option<Notice>) -> impl IntoView {
    notice.map(|notice| {
        let class = match notice.level {
            NoticeLevel::Warning => "notice notice--warning",
            NoticeLevel::Success => "notice notice--success",
        };
        let message = notice.message;
        view! { <div class=class role="status">{message}</div> }
    })
}

/// Discards the session: history, ideas and feedback.
#[component]
pub fn EndSessionButton() -> impl IntoView {
    view! {
        <form class="end-session" method="post" action="/session/end">
            <button class="btn btn--quiet" type="submit">"End session"</button>
        </form>
    }
}

/// `<select name="reference">` with the current selection preselected.
#[component]
pub fn ReferencePicker(options: Vec<ReferenceOption>) -> impl IntoView {
    view! {
        <select name="reference">
            {options
                .into_iter()
                .map(|option| {
                    let ReferenceOption { value, label, selected } = option;
                    view! { <option value=value selected=selected>{label}</option> }
                })
                .collect_view()}
        </select>
    }
}

/// Textbook picker. Posted with the chat form; sending with an empty
/// question only stores the selection. Affects later answers and ideas only.
#[component]
pub fn ReferenceSelector(options: Vec<ReferenceOption>) -> impl IntoView {
    view! {
        <section class="reference-selector">
            <h2>"Textbook / reference"</h2>
            <label>
                "Choose the textbook the tutor should consult."
                <ReferencePicker options=options/>
            </label>
            <p class="info">"Once a real model is connected, it should search and cite the selected textbook."</p>
        </section>
    }
}

/// Chat transcript in submission order plus the question input. Rendered
/// inside the page's chat form.
#[component]
pub fn ChatPanel(messages: Vec<ChatMessage>) -> impl IntoView {
    let transcript = if messages.is_empty() {
        view! { <div class="chat-panel__empty">"No messages yet"</div> }.into_any()
    } else {
        messages
            .into_iter()
            .map(|msg| {
                let role = msg.role.as_str();
                let class = format!("chat-panel__message chat-panel__message--{role}");
                let content = msg.content;
                view! {
                    <div class=class>
                        <span class="chat-panel__role">{role}</span>
                        <span class="chat-panel__text">{content}</span>
                    </div>
                }
            })
            .collect_view()
            .into_any()
    };

    view! {
        <section class="chat-panel">
            <h2>"Ask the level-adjusted tutor"</h2>
            <div class="chat-panel__messages">{transcript}</div>
            <div class="chat-panel__input-row">
                <input
                    class="chat-panel__input"
                    type="text"
                    name="question"
                    placeholder="Type your question"
                    autocomplete="off"
                />
                <button class="btn btn--primary" type="submit">"Send"</button>
            </div>
        </section>
    }
}

/// Idea submission form and the ideas submitted so far, newest first.
#[component]
pub fn IdeaPanel(ideas: Vec<IdeaRow>, references: Vec<ReferenceOption>) -> impl IntoView {
    let list = (!ideas.is_empty()).then(|| {
        let items = ideas
            .into_iter()
            .map(|idea| {
                let line = stamped_line(idea.submitted_at, &idea.text);
                let reference = format!("Reference: {}", idea.reference);
                view! {
                    <li>
                        {line}
                        <span class="entry-list__reference">{reference}</span>
                    </li>
                }
            })
            .collect_view();
        view! {
            <h4>"Submitted ideas"</h4>
            <ul class="entry-list">{items}</ul>
        }
    });

    view! {
        <section class="idea-panel">
            <h2>"Creative and critical ideas"</h2>
            <form method="post" action="/ideas">
                <label>
                    "Share an idea for improving the class"
                    <textarea name="text" rows="4" placeholder="e.g. a debate-style variant of the homework ..."></textarea>
                </label>
                <label class="idea-panel__reference">
                    "Reference for this idea"
                    <ReferencePicker options=references/>
                </label>
                <button class="btn" type="submit">"Submit idea"</button>
            </form>
            {list}
        </section>
    }
}

/// Developer feedback form and the feedback sent so far, newest first.
#[component]
pub fn FeedbackPanel(entries: Vec<FeedbackRow>) -> impl IntoView {
    let list = (!entries.is_empty()).then(|| {
        let items = entries
            .into_iter()
            .map(|entry| {
                let line = stamped_line(entry.submitted_at, &entry.text);
                view! { <li>{line}</li> }
            })
            .collect_view();
        view! {
            <h4>"Sent feedback"</h4>
            <ul class="entry-list">{items}</ul>
        }
    });

    view! {
        <section class="feedback-panel">
            <h2>"Send feedback to the developers"</h2>
            <form method="post" action="/feedback">
                <label>
                    "Your feedback"
                    <textarea name="text" rows="4" placeholder="e.g. bug reports, feature requests, improvements ..."></textarea>
                </label>
                <button class="btn" type="submit">"Send feedback"</button>
            </form>
            {list}
        </section>
    }
}
