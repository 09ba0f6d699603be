use leptos::prelude::*;

#[component]
pub fn AboutPage() -> impl IntoView {
    view! {
        <div class="about">
            <h1 class="about__title">"About TaskNest"</h1>
            <p class="about__lead">
                "TaskNest keeps your todo list in one place: add tasks with an optional "
                "deadline, mark them done, edit or delete them, and keep a short profile."
            </p>
            <h2>"Features"</h2>
            <ul class="about__features">
                <li>"Create, update and delete tasks"</li>
                <li>"Mark tasks as completed"</li>
                <li>"Deadlines for every task"</li>
                <li>"Profile with bio and avatar"</li>
            </ul>
        </div>
    }
}
