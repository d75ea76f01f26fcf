use bindify::{transform_html, TransformOptions};
use pretty_assertions::assert_eq;

fn run(html: &str) -> String {
    transform_html(html, &TransformOptions::default()).unwrap()
}

#[test]
fn static_markup_gains_no_binding_attribute() {
    let html = r#"<div class="a"><p>text</p></div>"#;
    assert_eq!(run(html), html);
}

#[test]
fn template_inserts_round_trip_byte_identical() {
    let html = r#"<div title="{{ x }}">{{ y\nwith lines }}</div>"#;
    assert_eq!(run(html), html);
}

#[test]
fn many_template_inserts_round_trip_byte_identical() {
    // With ten or more inserts, early placeholder tokens are strict
    // prefixes of later ones; every insert must still come back intact.
    let html: String = (1..=10)
        .map(|i| format!("<b>{{{{i{}}}}}</b>", i))
        .collect();
    assert_eq!(run(&html), html);
}

#[test]
fn template_inserts_survive_next_to_binding_content() {
    assert_eq!(
        run(r#"<p title="{{ t }}">{b} {{ t2 }}</p>"#),
        r#"<p title="{{ t }}"><span data-bind="text:this.b">{{b}}</span> {{ t2 }}</p>"#
    );
}

#[test]
fn value_attribute_gets_the_value_handler() {
    assert_eq!(
        run(r#"<div value="{a}">"#),
        r#"<div value="" data-bind="value:this.a"></div>"#
    );
}

#[test]
fn other_attributes_get_the_attr_handler() {
    assert_eq!(
        run(r#"<div class="x {a} y">"#),
        r#"<div class="x {{a}} y" data-bind="attr(class):'x '+this.a+' y'"></div>"#
    );
}

#[test]
fn text_content_anchors_to_the_parent() {
    assert_eq!(
        run("<div>{a}</div>"),
        r#"<div data-bind="text:this.a">{{a}}</div>"#
    );
}

#[test]
fn text_with_a_following_sibling_uses_text_first() {
    assert_eq!(
        run("<div>{a}<hr></div>"),
        r#"<div data-bind="text(first):this.a">{{a}}<hr></div>"#
    );
}

#[test]
fn text_after_a_sibling_uses_text_next() {
    assert_eq!(
        run("<div><b>x</b>{a}</div>"),
        r#"<div><b data-bind="text(next):this.a">x</b>{{a}}</div>"#
    );
}

#[test]
fn root_text_before_an_element_uses_text_prev() {
    assert_eq!(
        run("{a}<hr>"),
        r#"{{a}}<hr data-bind="text(prev):this.a">"#
    );
}

#[test]
fn bare_dynamic_text_is_wrapped_in_a_span() {
    assert_eq!(
        run("Hello {name}!"),
        r#"<span data-bind="text:'Hello '+this.name+'!'">Hello {{name}}!</span>"#
    );
}

#[test]
fn literal_token_lookalike_forces_counter_advancement() {
    assert_eq!(
        run("bindify_1 {{x}} {y}"),
        r#"bindify_1 {{x}} <span data-bind="text:this.y">{{y}}</span>"#
    );
}

#[test]
fn second_pass_is_a_fixed_point() {
    for html in [
        r#"<div value="{a}">"#,
        r#"<div class="x {a} y">"#,
        "<div>{a}</div>",
        "Hello {name}!",
        "<div>{{head}} {a}</div>",
    ] {
        let once = run(html);
        assert_eq!(run(&once), once, "not a fixed point for {:?}", html);
    }
}

#[test]
fn existing_binding_declarations_are_appended_to() {
    assert_eq!(
        run(r#"<div data-bind=" old:this.o " class="{c}"></div>"#),
        r#"<div data-bind="old:this.o,attr(class):this.c" class="{{c}}"></div>"#
    );
}

#[test]
fn several_dynamic_attributes_accumulate_in_order() {
    assert_eq!(
        run(r#"<input type="text" value="{v}" title="n: {n}">"#),
        "<input type=\"text\" value=\"\" title=\"n: {{n}}\" \
         data-bind=\"value:this.v,attr(title):'n: '+this.n\">"
    );
}

#[test]
fn quotes_in_literals_become_entities() {
    assert_eq!(
        run(r#"<div title='say "hi" {a}'></div>"#),
        r#"<div title="say "hi" {{a}}" data-bind="attr(title):'say &quot;hi&quot; '+this.a"></div>"#
    );
}

#[test]
fn xhtml_mode_self_closes_void_tags() {
    let options = TransformOptions {
        xhtml_mode: true,
        ..TransformOptions::default()
    };
    assert_eq!(
        transform_html(r#"<img src="{s}">"#, &options).unwrap(),
        r#"<img src="{{s}}" data-bind="attr(src):this.s" />"#
    );
}

#[test]
fn skip_attributes_are_left_alone() {
    let options = TransformOptions {
        skip_attributes: vec!["class".to_string()],
        ..TransformOptions::default()
    };
    assert_eq!(
        transform_html(r#"<div class="{c}" title="{t}"></div>"#, &options).unwrap(),
        r#"<div class="{c}" title="{{t}}" data-bind="attr(title):this.t"></div>"#
    );
}

#[test]
fn custom_delimiters_name_and_root() {
    let options = TransformOptions {
        bind_attribute_name: "x-bind".to_string(),
        template_delimiters: ("[[".to_string(), "]]".to_string()),
        binding_delimiters: ("<%".to_string(), "%>".to_string()),
        expression_root: "scope".to_string(),
        ..TransformOptions::default()
    };
    assert_eq!(
        transform_html("<div>v: <% a %></div>", &options).unwrap(),
        r#"<div x-bind="text:'v: '+scope.a">v: [[a]]</div>"#
    );
}

#[test]
fn unbalanced_binding_delimiters_stay_literal() {
    assert_eq!(run("<div>{oops</div>"), "<div>{oops</div>");
}
