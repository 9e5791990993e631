use crate::data::student::FieldErrors;
use maud::{Markup, Render, html};

pub fn render_nav() -> Markup {
    html! {
        nav class="w-full bg-gray-800 shadow-md mb-8 px-8 py-4 flex flex-row space-x-6" {
            a href="/" class="font-bold hover:text-blue-300" {"Roster"}
            a href="/students/find" class="hover:text-blue-300" {"Find Students"}
            a href="/students/list" class="hover:text-blue-300" {"All Students"}
            a href="/students/new" class="hover:text-blue-300" {"Add Student"}
        }
    }
}

pub fn table<const N: usize>(
    overall_title: impl Render,
    titles: [&'static str; N],
    items: Vec<[Markup; N]>,
) -> Markup {
    html! {
        div class="container mx-auto" {
            (overall_title)
            div class="overflow-x-auto" {
                table class="min-w-full bg-gray-800 rounded shadow-md" {
                    thead class="bg-gray-700" {
                        tr {
                            @for title in titles {
                                th class="py-2 px-4 text-left font-semibold text-gray-300" {(title)}
                            }
                        }
                    }
                    tbody {
                        @for row in items {
                            tr {
                                @for col in row {
                                    td class="py-2 px-4 border-b border-gray-600 text-gray-200" {(col)}
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

pub fn escape(s: impl AsRef<str>) -> Markup {
    html! {(s.as_ref())}
}

pub fn title(s: impl Render) -> Markup {
    html! {
        h1 class="text-2xl font-semibold mb-4" {(s)}
    }
}

pub fn labelled_value(label: &str, value: impl Render) -> Markup {
    html! {
        p class="text-gray-200 font-semibold" {
            (label) ": "
            span class="font-medium" {(value)}
        }
    }
}

pub fn field_errors(errors: &FieldErrors, field: &str) -> Markup {
    html! {
        @for message in errors.for_field(field) {
            p class="text-red-400 text-xs italic mt-1" {(message)}
        }
    }
}

pub fn form_element(id: &'static str, label: &'static str, errors: &FieldErrors, element: Markup) -> Markup {
    html! {
        div class="mb-4" {
            label for=(id) class="block text-sm font-bold mb-2 text-gray-300" {(label)}
            (element)
            (field_errors(errors, id))
        }
    }
}

pub fn simple_form_element(
    id: &'static str,
    label: &'static str,
    required: bool,
    input_type: Option<&'static str>,
    value: &str,
    errors: &FieldErrors,
) -> Markup {
    let input_type = input_type.unwrap_or("text");
    let border = if errors.for_field(id).next().is_some() {
        "border-red-500"
    } else {
        "border-gray-600"
    };

    form_element(id, label, errors, html! {
        input type=(input_type) id=(id) name=(id) value=(value) required[required] class={"shadow appearance-none border rounded w-full py-2 px-3 leading-tight focus:outline-none focus:shadow-outline bg-gray-700 " (border)} {}
    })
}

pub fn form_submit_button(text: Option<&str>) -> Markup {
    html! {
        div class="flex items-center justify-between" {
            button type="submit" class="bg-blue-500 hover:bg-blue-700 font-bold py-2 px-4 rounded focus:outline-none focus:shadow-outline" {
                (text.unwrap_or("Submit"))
            }
        }
    }
}

pub fn link_button(href: &str, text: &str, colour: &str) -> Markup {
    html! {
        a href=(href) class={"bg-" (colour) "-600 hover:bg-" (colour) "-800 font-bold py-2 px-4 rounded"} {(text)}
    }
}
