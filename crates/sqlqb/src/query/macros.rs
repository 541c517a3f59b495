/// Generate the WHERE-family methods for a query type that owns a
/// `WhereStatement` in the named field.
///
/// Usage:
/// ```ignore
/// impl DeleteQuery {
///     impl_where_methods!(where_clause);
/// }
/// ```
macro_rules! impl_where_methods {
    ($field:ident) => {
        /// Add a condition, joined with `AND`.
        pub fn where_(&mut self, filter: impl Into<$crate::condition::Filter>) -> &mut Self {
            self.$field.add_condition(filter);
            self
        }

        /// Add a condition, joined with `OR`.
        pub fn or_where(&mut self, filter: impl Into<$crate::condition::Filter>) -> &mut Self {
            self.$field.add_or_condition(filter);
            self
        }

        /// `field <operator> ?`, joined with `AND`. The two-argument
        /// `field = value` and fragment forms go through [`where_`](Self::where_).
        pub fn where_infix(
            &mut self,
            field: &str,
            operator: &str,
            value: impl Into<$crate::value::Operand>,
        ) -> &mut Self {
            self.$field
                .add_condition($crate::condition::Filter::cmp(field, operator, value));
            self
        }

        /// `field <operator> ?`, joined with `OR`.
        pub fn or_where_infix(
            &mut self,
            field: &str,
            operator: &str,
            value: impl Into<$crate::value::Operand>,
        ) -> &mut Self {
            self.$field
                .add_or_condition($crate::condition::Filter::cmp(field, operator, value));
            self
        }

        /// `field <> ?` (or `IS NOT NULL` / `NOT IN (...)`).
        pub fn not(&mut self, field: &str, value: impl Into<$crate::value::Operand>) -> &mut Self {
            self.$field
                .add_condition($crate::condition::Filter::cmp(field, "<>", value));
            self
        }

        /// `field <> ?` bound to `true`.
        pub fn not_true(&mut self, field: &str) -> &mut Self {
            self.not(field, true)
        }

        /// `field BETWEEN ? AND ?`, joined with `AND`.
        pub fn between(
            &mut self,
            field: &str,
            low: impl Into<$crate::value::Value>,
            high: impl Into<$crate::value::Value>,
        ) -> &mut Self {
            self.$field.add_between_condition(field, low, high);
            self
        }

        /// `field NOT BETWEEN ? AND ?`, joined with `AND`.
        pub fn not_between(
            &mut self,
            field: &str,
            low: impl Into<$crate::value::Value>,
            high: impl Into<$crate::value::Value>,
        ) -> &mut Self {
            self.$field.add_not_between_condition(field, low, high);
            self
        }

        /// `EXISTS (<subquery>)`.
        pub fn exists<F>(&mut self, f: F) -> &mut Self
        where
            F: Fn(&mut $crate::query::SelectQuery) + Send + Sync + 'static,
        {
            self.$field.add_exists_condition(f);
            self
        }

        /// `NOT EXISTS (<subquery>)`.
        pub fn not_exists<F>(&mut self, f: F) -> &mut Self
        where
            F: Fn(&mut $crate::query::SelectQuery) + Send + Sync + 'static,
        {
            self.$field.add_not_exists_condition(f);
            self
        }

        pub fn where_statement(&self) -> &$crate::statement::WhereStatement {
            &self.$field
        }

        pub fn where_statement_mut(&mut self) -> &mut $crate::statement::WhereStatement {
            &mut self.$field
        }
    };
}

/// Generate `order_by` and `limit` for a query type with `order_by` and
/// `limit` statement fields.
macro_rules! impl_order_limit_methods {
    () => {
        /// Add ORDER BY fields. `None` keeps any `ASC`/`DESC` written on the
        /// field itself.
        pub fn order_by(
            &mut self,
            fields: impl Into<$crate::statement::FieldList>,
            direction: Option<$crate::statement::Direction>,
        ) -> &mut Self {
            self.order_by.add_fields(fields, direction);
            self
        }

        /// `LIMIT count` or `LIMIT offset,count`. Invalid input is ignored.
        pub fn limit(
            &mut self,
            count: impl $crate::statement::LimitArg,
            offset: impl $crate::statement::LimitArg,
        ) -> &mut Self {
            self.limit.set_limit(count, offset);
            self
        }

        /// `LIMIT count` with no offset.
        pub fn limit_count(&mut self, count: impl $crate::statement::LimitArg) -> &mut Self {
            self.limit(count, 0)
        }

        pub fn order_statement(&self) -> &$crate::statement::OrderStatement {
            &self.order_by
        }

        pub fn limit_statement(&self) -> &$crate::statement::LimitStatement {
            &self.limit
        }
    };
}
