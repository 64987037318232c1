//! Lazy, path-driven evaluation.
//!
//! Every location in a document is described by the expressions that
//! contribute to it (its conjuncts). The conjuncts of a path are found by
//! walking the document from the root one selector at a time, expanding
//! references and `&` only as far as each step needs. Evaluating a location
//! merges its conjuncts: struct literals field by field, list literals
//! element by element and everything else through [`tform_merge::unify`].

use std::cmp::Ordering;
use std::collections::HashMap;
use std::rc::Rc;

use tform_merge::{describe, unify};
use tform_syntax::{BinaryOp, Decl, Expr, File, GuardDecl, LetDecl, Reference, UnaryOp};
use tform_types::{Field, Origin, Path, Selector, Struct, Value};

use crate::config::EvalConfig;
use crate::error::{EvalError, EvalResult};

/// Evaluate the files of one instance into a single struct value.
///
/// The top-level declarations of all files share one root scope, so a
/// field declared in several files is unified.
pub fn evaluate(files: &[File], config: &EvalConfig) -> EvalResult<Value> {
    let mut evaluator = Evaluator::new(files, config);
    let root = evaluator.root_conjuncts();
    if root.is_empty() {
        return Ok(Value::empty_struct());
    }
    let value = evaluator.eval_node(root, &Path::root())?;
    tracing::debug!(files = files.len(), "evaluated instance");
    Ok(value)
}

/// The lexical scope of one struct literal.
struct Scope<'a> {
    /// Where the literal is placed in the document.
    path: Path,
    decls: Vec<&'a [Decl]>,
    parent: Option<Rc<Scope<'a>>>,
    /// Set for literals reached only by selecting into a `let` value. Such a
    /// literal has no location, so its own fields resolve to their
    /// expressions rather than to paths.
    detached: bool,
}

#[derive(Clone)]
enum Conjunct<'a> {
    /// An expression written at `at`, whose references resolve in `env`.
    Expr {
        expr: &'a Expr,
        env: Rc<Scope<'a>>,
        at: Path,
    },
    /// The declarations of one struct literal.
    Decls {
        decls: &'a [Decl],
        scope: Rc<Scope<'a>>,
    },
    Value(Value),
}

/// What a reference head names.
enum Binding<'a> {
    Field(Path),
    /// A field of a detached literal.
    Local(&'a str, Rc<Scope<'a>>),
    Let(&'a LetDecl, Rc<Scope<'a>>),
}

/// A resolved reference: either a location in the document or, for `let`
/// bindings to non-reference values and fields of detached literals, the
/// expressions it stands for.
enum Resolved<'a> {
    Path(Path),
    Conjuncts(Vec<Conjunct<'a>>),
}

/// A guard as placed at one location; a `let` literal may be placed at
/// several.
type GuardKey = (*const GuardDecl, Path);

struct Evaluator<'a> {
    files: &'a [File],
    max_depth: usize,
    depth: usize,
    root: Rc<Scope<'a>>,
    guards: HashMap<GuardKey, bool>,
    pending_guards: Vec<GuardKey>,
    expanding: Vec<Path>,
}

impl<'a> Evaluator<'a> {
    fn new(files: &'a [File], config: &EvalConfig) -> Self {
        let root = Rc::new(Scope {
            path: Path::root(),
            decls: files.iter().map(|file| file.decls.as_slice()).collect(),
            parent: None,
            detached: false,
        });
        Self {
            files,
            max_depth: config.max_depth,
            depth: 0,
            root,
            guards: HashMap::new(),
            pending_guards: Vec::new(),
            expanding: Vec::new(),
        }
    }

    fn root_conjuncts(&self) -> Vec<Conjunct<'a>> {
        self.files
            .iter()
            .map(|file| Conjunct::Decls {
                decls: &file.decls,
                scope: self.root.clone(),
            })
            .collect()
    }

    /// Run `f` one level deeper, failing once the depth limit is passed.
    fn nested<T>(
        &mut self,
        path: &Path,
        f: impl FnOnce(&mut Self) -> EvalResult<T>,
    ) -> EvalResult<T> {
        if self.depth >= self.max_depth {
            return Err(EvalError::DepthExceeded {
                path: path.clone(),
                limit: self.max_depth,
            });
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    // ==================== EVALUATION ====================

    fn eval_node(&mut self, conjuncts: Vec<Conjunct<'a>>, path: &Path) -> EvalResult<Value> {
        self.nested(path, |this| {
            let mut expanded = Vec::new();
            for conjunct in conjuncts {
                this.expand(conjunct, &mut expanded)?;
            }

            let mut structs = Vec::new();
            let mut lists = Vec::new();
            let mut values = Vec::new();
            for conjunct in expanded {
                match conjunct {
                    Conjunct::Decls { decls, scope } => structs.push((decls, scope)),
                    Conjunct::Expr {
                        expr: Expr::List(items),
                        env,
                        at,
                    } => lists.push((items.as_slice(), env, at)),
                    Conjunct::Expr { expr, env, at } => {
                        values.push(this.eval_scalar(expr, &env, &at)?)
                    }
                    Conjunct::Value(value) => values.push(value),
                }
            }
            if !lists.is_empty() {
                values.insert(0, this.eval_lists(lists, path)?);
            }
            if !structs.is_empty() {
                values.insert(0, Value::Struct(this.eval_struct(structs, path)?));
            }

            Ok(values
                .iter()
                .try_fold(Value::Top, |acc, value| unify(&acc, value))
                .unwrap_or_else(|conflict| Value::Bottom(conflict.to_string())))
        })
    }

    fn eval_struct(
        &mut self,
        parts: Vec<(&'a [Decl], Rc<Scope<'a>>)>,
        path: &Path,
    ) -> EvalResult<Struct> {
        let mut fields = Vec::new();
        for (decls, scope) in parts {
            self.collect_fields(decls, &scope, None, &mut fields)?;
        }

        let mut out = Struct::new();
        for (label, conjuncts) in fields {
            let child = path.child(Selector::Field(label.clone()));
            let origin = self.origin_of(&conjuncts)?;
            let value = self.eval_node(conjuncts, &child)?;
            out.push(Field {
                label,
                value,
                origin,
            });
        }
        Ok(out)
    }

    fn eval_lists(
        &mut self,
        lists: Vec<(&'a [Expr], Rc<Scope<'a>>, Path)>,
        path: &Path,
    ) -> EvalResult<Value> {
        let Some((first, ..)) = lists.first() else {
            return Ok(Value::List(Vec::new()));
        };
        let len = first.len();
        if let Some((other, ..)) = lists.iter().find(|(items, ..)| items.len() != len) {
            return Ok(Value::Bottom(format!(
                "incompatible list lengths ({len} and {})",
                other.len()
            )));
        }

        let mut items = Vec::with_capacity(len);
        for index in 0..len {
            let selector = Selector::Index(index);
            let conjuncts = lists
                .iter()
                .map(|(exprs, env, at)| {
                    let exprs: &'a [Expr] = *exprs;
                    Conjunct::Expr {
                        expr: &exprs[index],
                        env: env.clone(),
                        at: at.child(selector.clone()),
                    }
                })
                .collect();
            items.push(self.eval_node(conjuncts, &path.child(selector))?);
        }
        Ok(Value::List(items))
    }

    /// Evaluate an expression that is neither a struct, a list, a reference
    /// nor a unification.
    fn eval_scalar(
        &mut self,
        expr: &'a Expr,
        env: &Rc<Scope<'a>>,
        at: &Path,
    ) -> EvalResult<Value> {
        Ok(match expr {
            Expr::Null => Value::Null,
            Expr::Bool(b) => Value::Bool(*b),
            Expr::Int(i) => Value::Int(*i),
            Expr::Float(f) => Value::Float(*f),
            Expr::String(s) => Value::String(s.clone()),
            Expr::Top => Value::Top,
            Expr::Kind(kind) => Value::Kind(*kind),
            Expr::Unary(op, operand) => {
                let value = self.eval_operand(operand, env, at)?;
                unary(*op, value, at)?
            }
            Expr::Binary(op, left, right) if *op != BinaryOp::Unify => {
                self.eval_binary(*op, left, right, env, at)?
            }
            Expr::Struct(_) | Expr::List(_) | Expr::Ref(_) | Expr::Binary(..) => {
                self.eval_operand(expr, env, at)?
            }
        })
    }

    fn eval_operand(
        &mut self,
        expr: &'a Expr,
        env: &Rc<Scope<'a>>,
        at: &Path,
    ) -> EvalResult<Value> {
        let conjunct = Conjunct::Expr {
            expr,
            env: env.clone(),
            at: at.clone(),
        };
        self.eval_node(vec![conjunct], at)
    }

    fn eval_binary(
        &mut self,
        op: BinaryOp,
        left: &'a Expr,
        right: &'a Expr,
        env: &Rc<Scope<'a>>,
        at: &Path,
    ) -> EvalResult<Value> {
        let lhs = self.eval_operand(left, env, at)?;
        match (op, &lhs) {
            (_, Value::Bottom(_)) => return Ok(lhs),
            (BinaryOp::And, Value::Bool(false)) | (BinaryOp::Or, Value::Bool(true)) => {
                return Ok(lhs)
            }
            _ => {}
        }
        let rhs = self.eval_operand(right, env, at)?;
        if let Value::Bottom(_) = rhs {
            return Ok(rhs);
        }
        binary(op, &lhs, &rhs, at)
    }

    // ==================== CONJUNCTS ====================

    /// Flatten `&` and references, and open struct literals into scopes.
    fn expand(&mut self, conjunct: Conjunct<'a>, out: &mut Vec<Conjunct<'a>>) -> EvalResult<()> {
        let at = match &conjunct {
            Conjunct::Expr { at, .. } => at.clone(),
            _ => {
                out.push(conjunct);
                return Ok(());
            }
        };
        self.nested(&at, |this| this.expand_expr(conjunct, out))
    }

    fn expand_expr(
        &mut self,
        conjunct: Conjunct<'a>,
        out: &mut Vec<Conjunct<'a>>,
    ) -> EvalResult<()> {
        match conjunct {
            Conjunct::Expr {
                expr: Expr::Binary(BinaryOp::Unify, left, right),
                env,
                at,
            } => {
                self.expand(
                    Conjunct::Expr {
                        expr: &**left,
                        env: env.clone(),
                        at: at.clone(),
                    },
                    out,
                )?;
                self.expand(
                    Conjunct::Expr {
                        expr: &**right,
                        env,
                        at,
                    },
                    out,
                )
            }
            Conjunct::Expr {
                expr: Expr::Struct(decls),
                env,
                at,
            } => {
                let detached = env.detached;
                let scope = Rc::new(Scope {
                    path: at,
                    decls: vec![decls.as_slice()],
                    parent: Some(env),
                    detached,
                });
                out.push(Conjunct::Decls {
                    decls: decls.as_slice(),
                    scope,
                });
                Ok(())
            }
            Conjunct::Expr {
                expr: Expr::Ref(reference),
                env,
                at,
            } => self.expand_reference(reference, &env, &at, out),
            other => {
                out.push(other);
                Ok(())
            }
        }
    }

    fn expand_reference(
        &mut self,
        reference: &Reference,
        env: &Rc<Scope<'a>>,
        at: &Path,
        out: &mut Vec<Conjunct<'a>>,
    ) -> EvalResult<()> {
        match self.resolve(reference, env, at)? {
            Resolved::Path(target) => {
                if at.starts_with(&target) || self.expanding.contains(&target) {
                    return Err(EvalError::StructuralCycle { path: at.clone() });
                }
                self.expanding.push(target.clone());
                let result = self.conjuncts_at(&target).and_then(|conjuncts| {
                    conjuncts
                        .into_iter()
                        .try_for_each(|conjunct| self.expand(conjunct, out))
                });
                self.expanding.pop();
                result
            }
            Resolved::Conjuncts(conjuncts) => conjuncts
                .into_iter()
                .try_for_each(|conjunct| self.expand(conjunct, out)),
        }
    }

    fn conjuncts_at(&mut self, path: &Path) -> EvalResult<Vec<Conjunct<'a>>> {
        let root = self.root_conjuncts();
        self.navigate(root, path)
    }

    fn navigate(
        &mut self,
        mut conjuncts: Vec<Conjunct<'a>>,
        path: &Path,
    ) -> EvalResult<Vec<Conjunct<'a>>> {
        for selector in path {
            conjuncts = self.children(conjuncts, selector)?;
        }
        Ok(conjuncts)
    }

    /// The conjuncts of one child of a location.
    ///
    /// A child that no conjunct declares is a bottom value, unless the
    /// parent is `_`, in which case it is `_` as well.
    fn children(
        &mut self,
        conjuncts: Vec<Conjunct<'a>>,
        selector: &Selector,
    ) -> EvalResult<Vec<Conjunct<'a>>> {
        let mut expanded = Vec::new();
        for conjunct in conjuncts {
            self.expand(conjunct, &mut expanded)?;
        }

        let mut fields = Vec::new();
        let mut others = Vec::new();
        let mut open = false;
        for conjunct in expanded {
            match (conjunct, selector) {
                (Conjunct::Decls { decls, scope }, Selector::Field(label)) => {
                    self.collect_fields(decls, &scope, Some(label.as_str()), &mut fields)?;
                }
                (
                    Conjunct::Expr {
                        expr: Expr::List(items),
                        env,
                        at,
                    },
                    Selector::Index(index),
                ) => {
                    if let Some(item) = items.get(*index) {
                        others.push(Conjunct::Expr {
                            expr: item,
                            env,
                            at: at.child(selector.clone()),
                        });
                    }
                }
                (Conjunct::Expr { expr: Expr::Top, .. }, _) => open = true,
                (Conjunct::Value(value), _) => match value {
                    Value::Top => open = true,
                    Value::Bottom(_) => others.push(Conjunct::Value(value)),
                    other => {
                        if let Some(child) = other.select(selector) {
                            others.push(Conjunct::Value(child.clone()));
                        }
                    }
                },
                _ => {}
            }
        }

        let mut result: Vec<_> = fields
            .into_iter()
            .flat_map(|(_, conjuncts)| conjuncts)
            .collect();
        result.extend(others);
        if result.is_empty() {
            result.push(Conjunct::Value(if open {
                Value::Top
            } else {
                Value::Bottom(missing(selector))
            }));
        }
        Ok(result)
    }

    /// Group the field declarations of a struct body by label, in order of
    /// first appearance. Active guards contribute their fields in place.
    fn collect_fields(
        &mut self,
        decls: &'a [Decl],
        scope: &Rc<Scope<'a>>,
        only: Option<&str>,
        out: &mut Vec<(String, Vec<Conjunct<'a>>)>,
    ) -> EvalResult<()> {
        for decl in decls {
            match decl {
                Decl::Field(field) => {
                    if only.is_some_and(|label| label != field.label) {
                        continue;
                    }
                    let conjunct = Conjunct::Expr {
                        expr: &field.value,
                        env: scope.clone(),
                        at: scope.path.child(Selector::Field(field.label.clone())),
                    };
                    match out.iter_mut().find(|(label, _)| *label == field.label) {
                        Some((_, conjuncts)) => conjuncts.push(conjunct),
                        None => out.push((field.label.clone(), vec![conjunct])),
                    }
                }
                Decl::Guard(guard) => {
                    if self.guard_active(guard, scope)? {
                        self.collect_fields(&guard.body, scope, only, out)?;
                    }
                }
                Decl::Let(_) => {}
            }
        }
        Ok(())
    }

    /// Field provenance: a field declared once, as a reference, points at
    /// the referenced location.
    fn origin_of(&mut self, conjuncts: &[Conjunct<'a>]) -> EvalResult<Origin> {
        if let [Conjunct::Expr {
            expr: Expr::Ref(reference),
            env,
            at,
        }] = conjuncts
        {
            if let Resolved::Path(target) = self.resolve(reference, env, at)? {
                return Ok(Origin::Reference(target));
            }
        }
        Ok(Origin::Literal)
    }

    // ==================== REFERENCES ====================

    /// Resolve a reference written in `env` whose value lands at `at`.
    fn resolve(
        &mut self,
        reference: &Reference,
        env: &Rc<Scope<'a>>,
        at: &Path,
    ) -> EvalResult<Resolved<'a>> {
        self.resolve_placed(reference, env, at, env.detached)
    }

    /// A `let` value is placed at `at`, unless selectors pick a part of it
    /// or the reference itself has no location; then it is detached.
    fn resolve_placed(
        &mut self,
        reference: &Reference,
        env: &Rc<Scope<'a>>,
        at: &Path,
        detached: bool,
    ) -> EvalResult<Resolved<'a>> {
        let selectors = Path::new(reference.selectors.clone());
        let detached = detached || !selectors.is_empty();
        self.nested(&env.path, |this| match this.bind(&reference.head, env)? {
            Binding::Field(base) => Ok(Resolved::Path(base.join(&selectors))),
            Binding::Local(label, scope) => {
                let conjuncts = this.local_conjuncts(&scope, label)?;
                Ok(Resolved::Conjuncts(this.navigate(conjuncts, &selectors)?))
            }
            Binding::Let(binding, scope) => match &binding.value {
                Expr::Ref(inner) => Ok(match this.resolve_placed(inner, &scope, at, detached)? {
                    Resolved::Path(target) => Resolved::Path(target.join(&selectors)),
                    Resolved::Conjuncts(conjuncts) => {
                        Resolved::Conjuncts(this.navigate(conjuncts, &selectors)?)
                    }
                }),
                value => {
                    let env = Rc::new(Scope {
                        path: at.clone(),
                        decls: Vec::new(),
                        parent: Some(scope),
                        detached,
                    });
                    let conjunct = Conjunct::Expr {
                        expr: value,
                        env,
                        at: at.clone(),
                    };
                    Ok(Resolved::Conjuncts(this.navigate(vec![conjunct], &selectors)?))
                }
            },
        })
    }

    /// The conjuncts of field `label` declared directly in `scope`.
    fn local_conjuncts(
        &mut self,
        scope: &Rc<Scope<'a>>,
        label: &str,
    ) -> EvalResult<Vec<Conjunct<'a>>> {
        let mut fields = Vec::new();
        for decls in scope.decls.clone() {
            self.collect_fields(decls, scope, Some(label), &mut fields)?;
        }
        Ok(fields
            .into_iter()
            .flat_map(|(_, conjuncts)| conjuncts)
            .collect())
    }

    /// Find the innermost scope that declares `head`.
    fn bind(&mut self, head: &str, env: &Rc<Scope<'a>>) -> EvalResult<Binding<'a>> {
        let mut current = Some(env.clone());
        while let Some(scope) = current {
            for decls in scope.decls.clone() {
                if let Some(binding) = self.find_in(decls, &scope, head)? {
                    return Ok(binding);
                }
            }
            current = scope.parent.clone();
        }
        Err(EvalError::UnresolvedReference {
            name: head.to_string(),
        })
    }

    fn find_in(
        &mut self,
        decls: &'a [Decl],
        scope: &Rc<Scope<'a>>,
        head: &str,
    ) -> EvalResult<Option<Binding<'a>>> {
        for decl in decls {
            match decl {
                Decl::Field(field) if field.label == head => {
                    if scope.detached {
                        return Ok(Some(Binding::Local(&field.label, scope.clone())));
                    }
                    let path = scope.path.child(Selector::Field(field.label.clone()));
                    return Ok(Some(Binding::Field(path)));
                }
                Decl::Let(binding) if binding.name == head => {
                    return Ok(Some(Binding::Let(binding, scope.clone())));
                }
                _ => {}
            }
        }
        for decl in decls {
            if let Decl::Guard(guard) = decl {
                if self.guard_active(guard, scope)? {
                    if let Some(binding) = self.find_in(&guard.body, scope, head)? {
                        return Ok(Some(binding));
                    }
                }
            }
        }
        Ok(None)
    }

    // ==================== GUARDS ====================

    /// Whether a guard's condition holds. A guard whose condition is still
    /// being evaluated counts as inactive.
    fn guard_active(&mut self, guard: &'a GuardDecl, scope: &Rc<Scope<'a>>) -> EvalResult<bool> {
        let key: GuardKey = (guard as *const GuardDecl, scope.path.clone());
        if let Some(active) = self.guards.get(&key) {
            return Ok(*active);
        }
        if self.pending_guards.contains(&key) {
            return Ok(false);
        }

        self.pending_guards.push(key.clone());
        let condition = self.eval_operand(&guard.condition, scope, &scope.path);
        self.pending_guards.pop();

        let active = match condition? {
            Value::Bool(active) => active,
            other => {
                return Err(EvalError::InvalidGuard {
                    path: scope.path.clone(),
                    found: found(&other),
                })
            }
        };
        if !active {
            tracing::debug!(
                path = %scope.path,
                line = guard.span.line,
                "guard condition not met"
            );
        }
        self.guards.insert(key, active);
        Ok(active)
    }
}

// ==================== OPERATORS ====================

fn invalid(at: &Path, op: &'static str, message: String) -> EvalError {
    EvalError::InvalidOperand {
        path: at.clone(),
        op,
        message,
    }
}

fn found(value: &Value) -> String {
    match value {
        Value::Bottom(message) => format!("_|_ ({message})"),
        other => describe(other),
    }
}

fn missing(selector: &Selector) -> String {
    match selector {
        Selector::Field(label) => format!("undefined field: {label}"),
        Selector::Index(index) => format!("index out of range [{index}]"),
    }
}

fn unary(op: UnaryOp, value: Value, at: &Path) -> EvalResult<Value> {
    match (op, value) {
        (_, bottom @ Value::Bottom(_)) => Ok(bottom),
        (UnaryOp::Not, Value::Bool(b)) => Ok(Value::Bool(!b)),
        (UnaryOp::Neg, Value::Int(i)) => i
            .checked_neg()
            .map(Value::Int)
            .ok_or_else(|| invalid(at, "-", format!("{i} overflows when negated"))),
        (UnaryOp::Neg, Value::Float(f)) => Ok(Value::Float(-f)),
        (UnaryOp::Not, other) => Err(invalid(
            at,
            "!",
            format!("expected bool, found {}", found(&other)),
        )),
        (UnaryOp::Neg, other) => Err(invalid(
            at,
            "-",
            format!("expected number, found {}", found(&other)),
        )),
    }
}

fn binary(op: BinaryOp, lhs: &Value, rhs: &Value, at: &Path) -> EvalResult<Value> {
    let symbol = op.symbol();
    match op {
        BinaryOp::And | BinaryOp::Or => match (lhs, rhs) {
            (Value::Bool(a), Value::Bool(b)) => Ok(Value::Bool(if op == BinaryOp::And {
                *a && *b
            } else {
                *a || *b
            })),
            _ => Err(invalid(
                at,
                symbol,
                format!("expected bools, found {} and {}", found(lhs), found(rhs)),
            )),
        },
        BinaryOp::Eq | BinaryOp::NotEq => {
            for operand in [lhs, rhs] {
                operand
                    .validate_concrete()
                    .map_err(|e| invalid(at, symbol, e.to_string()))?;
            }
            Ok(Value::Bool(same(lhs, rhs) == (op == BinaryOp::Eq)))
        }
        BinaryOp::Lt | BinaryOp::LtEq | BinaryOp::Gt | BinaryOp::GtEq => {
            let ordering = compare(lhs, rhs).ok_or_else(|| {
                invalid(
                    at,
                    symbol,
                    format!("cannot order {} and {}", found(lhs), found(rhs)),
                )
            })?;
            Ok(Value::Bool(match op {
                BinaryOp::Lt => ordering.is_lt(),
                BinaryOp::LtEq => ordering.is_le(),
                BinaryOp::Gt => ordering.is_gt(),
                _ => ordering.is_ge(),
            }))
        }
        BinaryOp::Unify => Ok(unify(lhs, rhs).unwrap_or_else(|c| Value::Bottom(c.to_string()))),
    }
}

/// Equality of data, ignoring field provenance. Numbers compare by value.
fn same(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Int(i), Value::Float(f)) | (Value::Float(f), Value::Int(i)) => *i as f64 == *f,
        (Value::Struct(x), Value::Struct(y)) => {
            x.len() == y.len()
                && x
                    .iter()
                    .all(|field| y.value(&field.label).is_some_and(|v| same(&field.value, v)))
        }
        (Value::List(x), Value::List(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(p, q)| same(p, q))
        }
        _ => a == b,
    }
}

fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => Some(x.cmp(y)),
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        _ => number(a)?.partial_cmp(&number(b)?),
    }
}

fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Int(i) => Some(*i as f64),
        Value::Float(f) => Some(*f),
        _ => None,
    }
}
